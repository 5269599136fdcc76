use std::env;
use std::sync::{Mutex, OnceLock};

use serde_json::Value;
use showroom_chat::NO_MATCH_REPLY;
use showroom_cli::commands::{ask, doctor, migrate, seed};
use showroom_db::connect_with_settings;

#[test]
fn migrate_returns_success_with_valid_env() {
    with_env(&[("SHOWROOM_DATABASE_URL", "sqlite::memory:")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 0, "expected successful migrate run");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["message"], "applied pending migrations");
    });
}

#[test]
fn migrate_reports_config_failure_for_unsupported_url() {
    with_env(&[("SHOWROOM_DATABASE_URL", "postgres://showroom")], || {
        let result = migrate::run();
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "migrate");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn seed_returns_deterministic_listing_summary() {
    with_env(&[("SHOWROOM_DATABASE_URL", "sqlite::memory:")], || {
        let result = seed::run();
        assert_eq!(result.exit_code, 0, "expected deterministic seed success");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "seed");
        assert_eq!(payload["status"], "ok");

        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.starts_with("Catalog seed dataset loaded successfully for 8 listings:"));

        let scenario_hit_line =
            "  - VIN-RAV4-0001: Toyota RAV4 (Red SUV under 20000 - expected hit for the scenario query)";
        let scenario_decoy_line =
            "  - VIN-ROGU-0002: Nissan Rogue (Black SUV under 20000 - excluded by color, not price)";
        let attribute_gap_line =
            "  - VIN-TUCS-0007: Hyundai Tucson (Hybrid SUV with a non-numeric price marker and missing interior color)";
        assert!(message.contains(scenario_hit_line));
        assert!(message.contains(scenario_decoy_line));
        assert!(message.contains(attribute_gap_line));
    });
}

#[test]
fn seed_is_idempotent_across_runs() {
    with_env(&[("SHOWROOM_DATABASE_URL", "sqlite::memory:")], || {
        let first = seed::run();
        assert_eq!(first.exit_code, 0, "expected first seed invocation success");
        let first_payload = parse_payload(&first.output);
        assert_eq!(first_payload["command"], "seed");
        assert_eq!(first_payload["status"], "ok");

        let second = seed::run();
        assert_eq!(second.exit_code, 0, "expected second seed invocation success");
        let second_payload = parse_payload(&second.output);
        assert_eq!(second_payload["command"], "seed");
        assert_eq!(second_payload["status"], "ok");

        assert_eq!(first_payload["message"], second_payload["message"]);
    });
}

#[test]
fn doctor_reports_catalog_not_ready_before_migrations() {
    with_env(&[("SHOWROOM_DATABASE_URL", "sqlite::memory:")], || {
        let payload = parse_payload(&doctor::run(true));

        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(payload["checks"][0]["name"], "config_validation");
        assert_eq!(payload["checks"][0]["status"], "pass");
        assert_eq!(payload["checks"][1]["name"], "database_connectivity");
        assert_eq!(payload["checks"][1]["status"], "pass");
        assert_eq!(payload["checks"][2]["name"], "catalog_readiness");
        assert_eq!(payload["checks"][2]["status"], "fail");
    });
}

#[test]
fn doctor_reports_all_pass_once_migrated() {
    // A named shared-cache database is required for separate pools to see
    // the same in-memory store; `sqlite::memory:` gives each pool its own.
    let url = "sqlite://file:commands_runtime_doctor?mode=memory&cache=shared";
    with_env(&[("SHOWROOM_DATABASE_URL", url)], || {
        let runtime = test_runtime();
        let keeper = runtime
            .block_on(connect_with_settings(url, 1, 30))
            .expect("shared in-memory database should open");

        let migrated = migrate::run();
        assert_eq!(migrated.exit_code, 0, "expected migrate to succeed before doctor");

        let payload = parse_payload(&doctor::run(true));
        assert_eq!(payload["overall_status"], "pass");
        assert_eq!(payload["summary"], "doctor: all readiness checks passed");
        assert_eq!(payload["checks"][2]["name"], "catalog_readiness");
        assert_eq!(payload["checks"][2]["status"], "pass");

        runtime.block_on(keeper.close());
    });
}

#[test]
fn doctor_human_output_marks_skipped_checks() {
    with_env(&[("SHOWROOM_DATABASE_URL", "postgres://showroom")], || {
        let report = doctor::run(false);

        assert!(report.starts_with("doctor: one or more readiness checks failed"));
        assert!(report.contains("- [fail] config_validation"));
        assert!(report.contains("- [skip] database_connectivity"));
        assert!(report.contains("- [skip] catalog_readiness"));
    });
}

#[test]
fn ask_reports_the_apology_for_an_empty_catalog() {
    with_env(&[("SHOWROOM_DATABASE_URL", "sqlite::memory:")], || {
        let result = ask::run("I want a red SUV under $20000");
        assert_eq!(result.exit_code, 0, "expected ask to succeed against an empty catalog");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "ask");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["message"], NO_MATCH_REPLY);
    });
}

#[test]
fn ask_answers_the_scenario_query_after_seeding() {
    // A named shared-cache database is required for separate pools to see
    // the same in-memory store; `sqlite::memory:` gives each pool its own.
    let url = "sqlite://file:commands_runtime_ask?mode=memory&cache=shared";
    with_env(&[("SHOWROOM_DATABASE_URL", url)], || {
        // The shared in-memory database lives only while a connection holds
        // it, so keep one open across the two commands.
        let runtime = test_runtime();
        let keeper = runtime
            .block_on(connect_with_settings(url, 1, 30))
            .expect("shared in-memory database should open");

        let seeded = seed::run();
        assert_eq!(seeded.exit_code, 0, "expected seed to succeed before ask");

        let result = ask::run("I want a red SUV under $20000");
        assert_eq!(result.exit_code, 0, "expected ask to answer the scenario query");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "ask");
        assert_eq!(payload["status"], "ok");

        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.starts_with("I found 1 car(s) matching your preferences."));
        assert!(message.contains("VIN-RAV4-0001"));
        assert!(!message.contains("VIN-ROGU-0002"));

        runtime.block_on(keeper.close());
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn test_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime should build")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "SHOWROOM_DATABASE_URL",
        "SHOWROOM_DATABASE_MAX_CONNECTIONS",
        "SHOWROOM_DATABASE_TIMEOUT_SECS",
        "SHOWROOM_SERVER_BIND_ADDRESS",
        "SHOWROOM_SERVER_PORT",
        "PORT",
        "SHOWROOM_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "SHOWROOM_SERVER_CHAT_RATE_LIMIT_PER_MINUTE",
        "SHOWROOM_LOGGING_LEVEL",
        "SHOWROOM_LOGGING_FORMAT",
        "SHOWROOM_LOG_LEVEL",
        "SHOWROOM_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
