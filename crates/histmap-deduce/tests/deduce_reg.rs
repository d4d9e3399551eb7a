//! Deduction regression test
//!
//! Replays the reference timelines through the scan, including the
//! footprint discontinuity case, and parses histories from their
//! stored text form.
//!
//! Run with:
//! ```
//! cargo test -p histmap-deduce --test deduce_reg
//! ```

use histmap_core::{DeductionResult, OPEN_LOWER, OPEN_UPPER, parse_history};
use histmap_deduce::{DeduceConfig, DeduceError, deduce, evaluate};
use histmap_test::RegParams;

fn deduce_text(text: &str, cfg: &DeduceConfig) -> Result<DeductionResult, DeduceError> {
    deduce(&parse_history(text)?, cfg)
}

fn check(rp: &mut RegParams, text: &str, lower: i32, upper: i32) {
    let r = deduce_text(text, &DeduceConfig::default()).unwrap();
    eprintln!("  {:?} -> {} {}", text.lines().collect::<Vec<_>>(), r.lower, r.upper);
    rp.compare_values(lower as f64, r.lower as f64, 0.0);
    rp.compare_values(upper as f64, r.upper as f64, 0.0);
}

#[test]
fn deduce_reg() {
    let mut rp = RegParams::new("deduce");

    // Disappearance
    check(&mut rp, "2010 1 4 4 100\n2015 1 4 4 102\n2020 0 4 4 0\n", 2015, 2020);
    // Present on every map
    check(&mut rp, "2000 1 7 7 50\n", OPEN_LOWER, 2000);
    // Never present
    check(&mut rp, "2000 0 7 7 0\n", 2000, OPEN_UPPER);
    check(&mut rp, "1990 0 7 7 0\n2000 0 7 7 0\n", 2000, OPEN_UPPER);
    // Footprint discontinuity: 500 / 100 = 5 > 4
    check(&mut rp, "2010 1 3 3 100\n2020 1 3 3 500\n", 2010, 2020);
    // Same, but shrinking
    check(&mut rp, "2010 1 3 3 500\n2020 1 3 3 100\n", 2010, 2020);

    // A higher threshold tolerates the change
    let loose = DeduceConfig { area_ratio: 6.0 };
    let r = deduce_text("2010 1 3 3 100\n2020 1 3 3 500\n", &loose).unwrap();
    rp.compare_bool(true, r == DeductionResult::new(OPEN_LOWER, 2020));

    // Concrete bounds are always ordered
    let r = deduce_text("1900 1 0 0 9\n1950 1 0 0 9\n1975 0 0 0 0\n", &loose).unwrap();
    rp.compare_bool(true, r.lower < r.upper);

    // Rejections
    rp.compare_bool(
        true,
        matches!(deduce_text("\n", &DeduceConfig::default()), Err(DeduceError::EmptyHistory)),
    );
    rp.compare_bool(
        true,
        matches!(
            deduce_text("2020 1 0 0 5\n2010 0 0 0 0\n", &DeduceConfig::default()),
            Err(DeduceError::UnorderedHistory { .. })
        ),
    );
    rp.compare_bool(
        true,
        matches!(
            deduce_text("2020 x 0 0 5\n", &DeduceConfig::default()),
            Err(DeduceError::Core(_))
        ),
    );

    // Evaluation against registry years
    let results = [
        deduce_text("2010 1 0 0 9\n2020 0 0 0 0\n", &DeduceConfig::default()).unwrap(),
        deduce_text("2010 1 0 0 9\n", &DeduceConfig::default()).unwrap(),
    ];
    let summary = evaluate(results.iter().zip([2012, 2015]));
    eprintln!("  {}", summary);
    rp.compare_values(2.0, summary.evaluated as f64, 0.0);
    rp.compare_values(1.0, summary.consistent as f64, 0.0);

    assert!(rp.cleanup());
}
