//! Property tests over the gate and report, using in-memory preferences

use mobile_build_gate::counters::PrefValue;
use mobile_build_gate::{
  BuildConfig, BuildGate, CounterStore, GateOutcome, MemoryPreferenceStore, Platform, SigningState, StopPolicy,
  ValidationReport, default_catalog,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn platform() -> impl Strategy<Value = Platform> {
  prop_oneof![Just(Platform::Android), Just(Platform::Ios), Just(Platform::Other)]
}

fn text() -> impl Strategy<Value = String> {
  prop_oneof![Just(String::new()), Just("  ".to_string()), "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}", "[A-Za-z ]{1,12}"]
}

fn build_config() -> impl Strategy<Value = BuildConfig> {
  (
    platform(),
    text(),
    text(),
    text(),
    0_usize..4,
    any::<bool>(),
    any::<bool>(),
    text(),
  )
    .prop_map(
      |(platform, bundle_identifier, company_name, product_name, scene_count, is_development_build, custom, keystore)| {
        BuildConfig {
          platform,
          bundle_identifier,
          company_name,
          product_name,
          scene_count,
          is_development_build,
          signing: SigningState {
            uses_custom_credential: custom,
            credential_reference: keystore,
          },
          bundle_version: "1.0.0".to_string(),
        }
      },
    )
}

fn counters(android: u64, ios: u64, toggle: bool) -> CounterStore<MemoryPreferenceStore> {
  let prefs = MemoryPreferenceStore::new()
    .with("MBM_AndroidVersionCode", PrefValue::Int(android))
    .with("MBM_IosBuildNumber", PrefValue::Int(ios))
    .with("MBM_AutoIncrementOnBuild", PrefValue::Bool(toggle));
  CounterStore::new(prefs, "MBM_")
}

proptest! {
  #![proptest_config(Config::with_cases(256))]

  #[test]
  fn gate_moves_at_most_the_target_counter_by_one(
    config in build_config(),
    target in platform(),
    android in 0_u64..1_000_000,
    ios in 0_u64..1_000_000,
    toggle in any::<bool>(),
  ) {
    let engine = default_catalog();
    let mut store = counters(android, ios, toggle);

    let outcome = BuildGate::new(&engine, &mut store).validate_and_gate(target, &config);
    prop_assert!(outcome.is_ok());

    let after_android = store.current(Platform::Android).unwrap();
    let after_ios = store.current(Platform::Ios).unwrap();

    match outcome.unwrap() {
      GateOutcome::Blocked(_) => {
        prop_assert!(target.is_mobile());
        prop_assert_eq!(store.store().writes(), 0);
        prop_assert_eq!((after_android, after_ios), (android, ios));
      }
      GateOutcome::Passed(report) => {
        let bumped = toggle && target.is_mobile();
        prop_assert_eq!(report.increments.len(), usize::from(bumped));
        let expected_android = android + u64::from(bumped && target == Platform::Android);
        let expected_ios = ios + u64::from(bumped && target == Platform::Ios);
        prop_assert_eq!(after_android, expected_android);
        prop_assert_eq!(after_ios, expected_ios);
      }
    }
  }

  #[test]
  fn gate_blocks_exactly_when_a_blocking_rule_fails(config in build_config(), target in platform()) {
    let engine = default_catalog();
    let mut store = counters(0, 0, true);

    let expected_block = target.is_mobile()
      && engine
        .evaluate(&config.for_platform(target), StopPolicy::Never)
        .has_blocking_failure();

    let outcome = BuildGate::new(&engine, &mut store).validate_and_gate(target, &config).unwrap();
    prop_assert_eq!(!outcome.is_passed(), expected_block);
  }

  #[test]
  fn first_blocking_matches_gate_verdict(config in build_config()) {
    let engine = default_catalog();
    let full = engine.evaluate_all(&config);
    let short = engine.evaluate(&config, StopPolicy::FirstBlocking);

    prop_assert_eq!(full.first_blocking(), short.first_blocking());
    prop_assert!(short.outcomes.len() <= 1);
  }

  #[test]
  fn report_is_read_only_and_repeatable(
    config in build_config(),
    android in 0_u64..1_000,
    ios in 0_u64..1_000,
    toggle in any::<bool>(),
  ) {
    let engine = default_catalog();
    let store = counters(android, ios, toggle);

    let first = ValidationReport::build(&engine, &config, &store).unwrap();
    let second = ValidationReport::build(&engine, &config, &store).unwrap();

    prop_assert_eq!(&first, &second);
    prop_assert_eq!(store.store().writes(), 0);
    prop_assert_eq!(first.counters.android_version_code, android);
    prop_assert_eq!(first.counters.next_android, toggle.then_some(android + 1));
  }
}
