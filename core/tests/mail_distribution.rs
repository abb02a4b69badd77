//! Mail amount distribution: the 90% valid share is statistical, so it is
//! checked over a large aggregate sample.

use raffle_core::amounts;
use raffle_core::config::GenConfig;
use raffle_core::generator::{self, Generator};

fn mail_heavy_config(ticket_cost: i64, seed: u64) -> GenConfig {
    GenConfig {
        blank_count: 0,
        roster_count: 0,
        mail_count: 300,
        mixed_count: 0,
        ticket_cost,
        seed,
        ..GenConfig::default_test()
    }
}

#[test]
fn valid_share_converges_to_ninety_percent() {
    // 300 mail accounts at 10-30 entries each gives a 3000-9000 entry
    // sample, comfortably past the 5000-entry aggregate target.
    let data = Generator::new(mail_heavy_config(1000, 42)).generate().unwrap();
    let report = amounts::check(&data, None).unwrap();

    assert!(
        report.total_entries >= 3000,
        "sample too small to be meaningful: {}",
        report.total_entries
    );
    let fraction = report.valid_fraction();
    assert!(
        (0.85..=0.95).contains(&fraction),
        "valid share {fraction:.3} strayed from 0.90 over {} entries",
        report.total_entries
    );
    assert!(!report.is_anomalous(), "a healthy run must not be flagged");
}

#[test]
fn valid_share_holds_for_other_ticket_costs() {
    for (cost, seed) in [(500, 1u64), (1500, 2), (2000, 3)] {
        let data = Generator::new(mail_heavy_config(cost, seed)).generate().unwrap();
        let report = amounts::check(&data, None).unwrap();
        assert_eq!(report.ticket_cost, cost, "cost must be read from the file");
        let fraction = report.valid_fraction();
        assert!(
            (0.85..=0.95).contains(&fraction),
            "cost {cost}: valid share {fraction:.3} out of tolerance"
        );
    }
}

#[test]
fn amounts_stay_inside_documented_bounds() {
    let data = Generator::new(mail_heavy_config(1000, 11)).generate().unwrap();
    for (account, entry) in data.mail_entries() {
        assert!(
            (generator::MAIL_AMOUNT_MIN..=generator::MAIL_AMOUNT_MAX).contains(&entry.amount),
            "{}: amount {} outside [{}, {}]",
            account.name,
            entry.amount,
            generator::MAIL_AMOUNT_MIN,
            generator::MAIL_AMOUNT_MAX
        );
    }
}

#[test]
fn mail_entry_counts_stay_inside_bounds() {
    let data = Generator::new(mail_heavy_config(1000, 12)).generate().unwrap();
    for account in &data.accounts {
        let Some(mail) = &account.mail else { continue };
        let count = mail.entries.len() as i64;
        assert!(
            (generator::MAIL_ENTRIES_MIN..=generator::MAIL_ENTRIES_MAX).contains(&count),
            "{}: {count} mail entries outside [{}, {}]",
            account.name,
            generator::MAIL_ENTRIES_MIN,
            generator::MAIL_ENTRIES_MAX
        );
    }
}

#[test]
fn invalid_amounts_carry_a_nonzero_remainder() {
    let data = Generator::new(mail_heavy_config(1000, 13)).generate().unwrap();
    let report = amounts::check(&data, None).unwrap();

    assert!(
        report.invalid_count > 0,
        "a multi-thousand entry sample should contain invalid amounts"
    );
    for sample in &report.invalid_sample {
        assert_ne!(sample.remainder, 0);
        assert_eq!(sample.amount % report.ticket_cost, sample.remainder);
    }
}

#[test]
fn ticket_cost_override_wins_over_the_file() {
    let data = Generator::new(mail_heavy_config(1000, 14)).generate().unwrap();
    let report = amounts::check(&data, Some(7)).unwrap();
    assert_eq!(report.ticket_cost, 7);
}

#[test]
fn edge_ticket_costs_still_generate_in_bounds() {
    // The extremes of the accepted cost range: 2 and the amount ceiling.
    for cost in [2, 1_000_000] {
        let config = GenConfig {
            mail_count: 5,
            ticket_cost: cost,
            ..mail_heavy_config(cost, 21)
        };
        let data = Generator::new(config).generate().unwrap();
        for (_, entry) in data.mail_entries() {
            assert!(
                (generator::MAIL_AMOUNT_MIN..=generator::MAIL_AMOUNT_MAX)
                    .contains(&entry.amount),
                "cost {cost}: amount {} escaped the bounds",
                entry.amount
            );
        }
    }
}
