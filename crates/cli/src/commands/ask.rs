use std::sync::Arc;

use crate::commands::CommandResult;
use showroom_chat::ChatRuntime;
use showroom_core::config::{AppConfig, LoadOptions};
use showroom_db::{connect_with_config, migrations, Catalog, SqlCatalogStore};

/// Runs one chat message through the same pipeline the HTTP server uses.
///
/// Migrations are applied first, matching server bootstrap, so `ask` works
/// against a fresh database without a separate `migrate` invocation.
pub fn run(message: &str) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "ask",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "ask",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_with_config(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let chat = ChatRuntime::new(Catalog::new(Arc::new(SqlCatalogStore::new(pool.clone()))));
        let reply = chat
            .handle_message(message)
            .await
            .map_err(|error| ("chat_pipeline", error.to_string(), 6u8))?;

        pool.close().await;
        Ok::<String, (&'static str, String, u8)>(reply)
    });

    match result {
        Ok(reply) => CommandResult::success("ask", reply),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("ask", error_class, message, exit_code)
        }
    }
}
