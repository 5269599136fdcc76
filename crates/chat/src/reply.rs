use showroom_core::domain::listing::CarListing;

/// Reply sent when the catalog search comes back empty.
pub const NO_MATCH_REPLY: &str = "I'm sorry, I couldn't find any cars matching your preferences. Could you please try with different criteria?";

const CLOSING_PROMPT: &str = "\nIs there anything specific you'd like to know about these cars?";

/// Stands in for any attribute a listing does not carry.
const ATTRIBUTE_DEFAULT: &str = "N/A";

/// Renders the fixed chat reply for a page of catalog matches.
///
/// The layout is part of the chat contract: a count header, numbered cards in
/// catalog order with every attribute slot present, and the closing prompt
/// after the last card. Stored attribute text is echoed verbatim, so a
/// listing priced `N/A` renders as `Price: $N/A`.
pub fn render_reply(listings: &[CarListing]) -> String {
    if listings.is_empty() {
        return NO_MATCH_REPLY.to_string();
    }

    let mut reply = format!(
        "I found {} car(s) matching your preferences. Here are the details:\n\n",
        listings.len()
    );
    for (index, listing) in listings.iter().enumerate() {
        reply.push_str(&format!("{}. {}\n", index + 1, listing_card(listing)));
    }
    reply.push_str(CLOSING_PROMPT);
    reply
}

fn listing_card(listing: &CarListing) -> String {
    format!(
        "\n{} {}\nType: {}\nColor: {}\nInterior Color: {}\nTransmission: {}\nEngine: {}\nFuel: {}\nMileage: {}\nPrice: ${}\nVIN: {}\n",
        attribute(&listing.brand),
        attribute(&listing.name),
        attribute(&listing.body_style),
        attribute(&listing.color),
        attribute(&listing.interior_color),
        attribute(&listing.transmission),
        attribute(&listing.engine),
        attribute(&listing.fuel),
        attribute(&listing.mileage),
        attribute(&listing.price),
        attribute(&listing.vin),
    )
}

fn attribute(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(ATTRIBUTE_DEFAULT)
}
