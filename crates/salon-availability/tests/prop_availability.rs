//! Property-based tests for slot generation using proptest.
//!
//! These check invariants that hold for *any* opening window, service,
//! buffer and booking load, not just the scenarios in `availability_tests.rs`.

use proptest::prelude::*;
use salon_availability::blocked::BlockedInterval;
use salon_availability::clock::{format_clock_time, parse_clock_time};
use salon_availability::hours::DayHours;
use salon_availability::generate_slots;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// An opening window inside a single day; `closes` may precede `opens`.
fn arb_hours() -> impl Strategy<Value = DayHours> {
    (0u32..1440, 0u32..1440).prop_map(|(opens, closes)| DayHours { opens, closes })
}

fn arb_duration() -> impl Strategy<Value = u32> {
    15u32..=480
}

fn arb_buffer() -> impl Strategy<Value = u32> {
    0u32..=60
}

fn arb_blocked() -> impl Strategy<Value = Vec<BlockedInterval>> {
    prop::collection::vec(
        (0u32..1440, 1u32..=240).prop_map(|(start, len)| BlockedInterval {
            start,
            end: (start + len).min(1440),
        }),
        0..8,
    )
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: every start sits on the grid anchored at opening time
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn starts_are_grid_aligned(
        hours in arb_hours(),
        duration in arb_duration(),
        buffer in arb_buffer(),
        blocked in arb_blocked(),
    ) {
        let step = duration + buffer;
        for slot in generate_slots(hours, duration, buffer, &blocked) {
            let start = slot.start.minutes();
            prop_assert!(start >= hours.opens);
            prop_assert_eq!((start - hours.opens) % step, 0, "start {} off grid", start);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: no slot footprint (service + buffer) overlaps a blocked interval
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn no_slot_overlaps_a_blocked_interval(
        hours in arb_hours(),
        duration in arb_duration(),
        buffer in arb_buffer(),
        blocked in arb_blocked(),
    ) {
        for slot in generate_slots(hours, duration, buffer, &blocked) {
            let start = slot.start.minutes();
            let footprint_end = start + duration + buffer;
            for b in &blocked {
                prop_assert!(
                    !(start < b.end && footprint_end > b.start),
                    "slot [{}, {}) overlaps blocked [{}, {})",
                    start, footprint_end, b.start, b.end
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: strictly increasing starts, footprints inside opening hours
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_are_ordered_and_within_hours(
        hours in arb_hours(),
        duration in arb_duration(),
        buffer in arb_buffer(),
        blocked in arb_blocked(),
    ) {
        let slots = generate_slots(hours, duration, buffer, &blocked);
        for pair in slots.windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
        }
        for slot in &slots {
            prop_assert_eq!(slot.end.minutes() - slot.start.minutes(), duration);
            prop_assert!(slot.start.minutes() + duration + buffer <= hours.closes);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: an empty day yields exactly floor(window / step) slots
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn empty_day_fills_every_step(
        hours in arb_hours(),
        duration in arb_duration(),
        buffer in arb_buffer(),
    ) {
        let step = duration + buffer;
        let window = hours.closes.saturating_sub(hours.opens);
        let slots = generate_slots(hours, duration, buffer, &[]);
        prop_assert_eq!(slots.len() as u32, window / step);
    }
}

// ---------------------------------------------------------------------------
// Property 5: blocking can only remove slots, never add or move them
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn blocked_result_is_subset_of_free_result(
        hours in arb_hours(),
        duration in arb_duration(),
        buffer in arb_buffer(),
        blocked in arb_blocked(),
    ) {
        let free = generate_slots(hours, duration, buffer, &[]);
        for slot in generate_slots(hours, duration, buffer, &blocked) {
            prop_assert!(free.contains(&slot));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: clock-time round-trip
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn clock_time_round_trip(minutes in 0u32..1440) {
        let text = format_clock_time(minutes).unwrap();
        prop_assert_eq!(text.len(), 5);
        prop_assert_eq!(parse_clock_time(&text).unwrap(), minutes);
    }
}
