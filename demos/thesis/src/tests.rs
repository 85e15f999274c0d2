//! Tests for the thesis binary's setup helpers.

#[cfg(test)]
mod setup_tests {
    use std::path::Path;

    use sos_core::SosType;

    use crate::{init_tracing, load_scenario};

    #[test]
    fn second_subscriber_install_is_reported() {
        let _ = init_tracing();
        let err = init_tracing().unwrap_err();
        assert!(err.to_string().contains("tracing subscriber"));
    }

    #[test]
    fn bundled_scenario_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenario.toml");
        let file = load_scenario(Some(&path)).unwrap();
        assert_eq!(file.scenario.sos_type, SosType::Acknowledged);
        assert_eq!(file.scenario.output_interval_ticks, 10);
        assert_eq!(file.units.fire_fighters, 5);
        assert_eq!(file.units.poll_interval, 5);
    }

    #[test]
    fn missing_config_uses_defaults() {
        let file = load_scenario(None).unwrap();
        assert_eq!(file.units.fire_fighters, 5);
    }
}
