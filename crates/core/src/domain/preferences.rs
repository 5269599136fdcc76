use serde::{Deserialize, Serialize};

/// Attribute constraints extracted from one chat message.
///
/// Each slot holds at most one value; an absent slot leaves that dimension
/// unconstrained. A set is built per message, consumed by one catalog query,
/// and discarded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSet {
    pub fuel: Option<FuelKind>,
    pub price_ceiling: Option<u64>,
    pub brand: Option<Brand>,
    pub body_style: Option<BodyStyle>,
    pub color: Option<Color>,
}

impl ConstraintSet {
    pub fn is_empty(&self) -> bool {
        self.fuel.is_none()
            && self.price_ceiling.is_none()
            && self.brand.is_none()
            && self.body_style.is_none()
            && self.color.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelKind {
    Electric,
    Gasoline,
    Petrol,
    Hybrid,
}

impl FuelKind {
    /// Scan order for extraction; the first keyword found in a message wins.
    pub const DETECTION_ORDER: [FuelKind; 4] =
        [FuelKind::Electric, FuelKind::Gasoline, FuelKind::Petrol, FuelKind::Hybrid];

    /// Lower-case form matched in free text and held in a constraint set.
    pub fn keyword(self) -> &'static str {
        match self {
            FuelKind::Electric => "electric",
            FuelKind::Gasoline => "gasoline",
            FuelKind::Petrol => "petrol",
            FuelKind::Hybrid => "hybrid",
        }
    }

    /// Capitalized form used by catalog rows (`Electric`, `Hybrid`, ...).
    pub fn canonical(self) -> String {
        capitalize_first(self.keyword())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brand {
    Bmw,
    MercedesBenz,
    Toyota,
    Nissan,
    Lamborghini,
    Hyundai,
}

impl Brand {
    pub const DETECTION_ORDER: [Brand; 6] = [
        Brand::Bmw,
        Brand::MercedesBenz,
        Brand::Toyota,
        Brand::Nissan,
        Brand::Lamborghini,
        Brand::Hyundai,
    ];

    /// Lower-case form matched in free text.
    pub fn keyword(self) -> &'static str {
        match self {
            Brand::Bmw => "bmw",
            Brand::MercedesBenz => "mercedes-benz",
            Brand::Toyota => "toyota",
            Brand::Nissan => "nissan",
            Brand::Lamborghini => "lamborghini",
            Brand::Hyundai => "hyundai",
        }
    }

    /// Catalog casing, passed to queries exactly as written here.
    pub fn label(self) -> &'static str {
        match self {
            Brand::Bmw => "BMW",
            Brand::MercedesBenz => "Mercedes-Benz",
            Brand::Toyota => "Toyota",
            Brand::Nissan => "Nissan",
            Brand::Lamborghini => "Lamborghini",
            Brand::Hyundai => "Hyundai",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyStyle {
    Suv,
    Sedan,
    Truck,
    Convertible,
}

impl BodyStyle {
    pub const DETECTION_ORDER: [BodyStyle; 4] =
        [BodyStyle::Suv, BodyStyle::Sedan, BodyStyle::Truck, BodyStyle::Convertible];

    /// Lower-case form matched in free text.
    pub fn keyword(self) -> &'static str {
        match self {
            BodyStyle::Suv => "suv",
            BodyStyle::Sedan => "sedan",
            BodyStyle::Truck => "truck",
            BodyStyle::Convertible => "convertible",
        }
    }

    /// Catalog casing, passed to queries exactly as written here.
    pub fn label(self) -> &'static str {
        match self {
            BodyStyle::Suv => "SUV",
            BodyStyle::Sedan => "Sedan",
            BodyStyle::Truck => "Truck",
            BodyStyle::Convertible => "Convertible",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
    Red,
    Blue,
    Green,
    Silver,
    Gray,
}

impl Color {
    pub const DETECTION_ORDER: [Color; 7] = [
        Color::Black,
        Color::White,
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Silver,
        Color::Gray,
    ];

    /// Lower-case form matched in free text and held in a constraint set.
    pub fn keyword(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Silver => "silver",
            Color::Gray => "gray",
        }
    }

    /// Capitalized form used by catalog rows (`Black`, `Silver`, ...).
    pub fn canonical(self) -> String {
        capitalize_first(self.keyword())
    }
}

/// First character upper-cased, remainder lower-cased (`gray` -> `Gray`).
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(value.len());
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(char::to_lowercase));
            out
        }
        None => String::new(),
    }
}
