use glidepath::systems::{batch::run_seed, run_batch};
use glidepath::utils::RngManager;
use glidepath::ApproachMetrics;

use crate::common::{gusty_config, run};

#[test]
fn test_batch_matches_individual_runs() {
    let config = gusty_config(0);
    let report = run_batch(&config, 6, 77).unwrap();
    let rng_manager = RngManager::new(77);

    assert_eq!(report.runs.len(), 6);
    for (index, batch_run) in report.runs.iter().enumerate() {
        let seed = run_seed(&rng_manager, index);
        assert_eq!(batch_run.seed, seed);

        let single = config.with_seed(seed);
        let metrics = ApproachMetrics::from_outcome(&run(&single), &single);
        assert_eq!(batch_run.metrics, metrics);
    }
}

#[test]
fn test_batch_summary() {
    let report = run_batch(&gusty_config(0), 5, 3).unwrap();
    assert_eq!(
        report.landed() + report.aborted() + report.timed_out(),
        report.runs.len()
    );
    assert_eq!(report.landed(), 5);
    assert!(report.touchdown_lateral_rms().is_some());
}

#[test]
fn test_master_seed_changes_runs() {
    let config = gusty_config(0);
    let a = run_batch(&config, 2, 1).unwrap();
    let b = run_batch(&config, 2, 2).unwrap();
    assert_ne!(a.runs[0].seed, b.runs[0].seed);
    assert_ne!(a.runs[0].metrics, b.runs[0].metrics);
}
