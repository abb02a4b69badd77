//! Day-window subset invariants must hold for every entry, every seed.

use raffle_core::config::GenConfig;
use raffle_core::consistency;
use raffle_core::generator::{self, Generator};

fn roster_heavy_config(seed: u64) -> GenConfig {
    GenConfig {
        blank_count: 0,
        roster_count: 20,
        mail_count: 0,
        mixed_count: 10,
        seed,
        ..GenConfig::default_test()
    }
}

#[test]
fn short_windows_never_exceed_long_windows() {
    for seed in [1, 2, 3, 42, 0xFEED_BEEF] {
        let data = Generator::new(roster_heavy_config(seed)).generate().unwrap();
        let mut entries = 0usize;
        for (account, entry) in data.roster_entries() {
            entries += 1;
            assert!(
                entry.sales10 <= entry.sales30,
                "seed {seed}, {} / {}: sales10 ({}) > sales30 ({})",
                account.name,
                entry.account,
                entry.sales10,
                entry.sales30
            );
            assert!(
                entry.purchases10 <= entry.purchases30,
                "seed {seed}, {} / {}: purchases10 ({}) > purchases30 ({})",
                account.name,
                entry.account,
                entry.purchases10,
                entry.purchases30
            );
        }
        assert!(entries > 0, "seed {seed} generated no roster entries");
    }
}

#[test]
fn totals_stay_inside_documented_ranges() {
    let data = Generator::new(roster_heavy_config(9)).generate().unwrap();
    for (account, entry) in data.roster_entries() {
        assert!(
            (0..=generator::SALES30_MAX).contains(&entry.sales30),
            "{}: sales30 {} out of range",
            account.name,
            entry.sales30
        );
        assert!(
            (0..=generator::PURCHASES30_MAX).contains(&entry.purchases30),
            "{}: purchases30 {} out of range",
            account.name,
            entry.purchases30
        );
        assert!(entry.sales10 >= 0 && entry.purchases10 >= 0);
    }
}

#[test]
fn roster_entry_counts_stay_inside_bounds() {
    let data = Generator::new(roster_heavy_config(123)).generate().unwrap();
    for account in &data.accounts {
        let Some(roster) = &account.roster else { continue };
        let count = roster.entries.len() as i64;
        assert!(
            (generator::ROSTER_ENTRIES_MIN..=generator::ROSTER_ENTRIES_MAX).contains(&count),
            "{}: {count} roster entries outside [{}, {}]",
            account.name,
            generator::ROSTER_ENTRIES_MIN,
            generator::ROSTER_ENTRIES_MAX
        );
    }
}

#[test]
fn generated_data_passes_the_consistency_check() {
    let data = Generator::new(roster_heavy_config(77)).generate().unwrap();
    let report = consistency::check(&data);

    let expected = data.roster_entries().count();
    assert_eq!(report.entries_checked, expected);
    assert!(
        report.is_consistent(),
        "generator emitted inconsistent entries: {:?}",
        report.violations
    );
}
