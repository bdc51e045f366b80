use chrono::{TimeZone, Utc};
use perpscout::models::Timeframe;
use perpscout::scanner::schedule::next_close_delay;

#[test]
fn delay_never_exceeds_one_bar_plus_buffer() {
    for offset in [0, 1, 450, 899] {
        let now = Utc.timestamp_opt(1_700_000_000 + offset, 0).unwrap();
        let delay = next_close_delay(Timeframe::M15, now);
        assert!(delay.as_secs() <= 900 + 5, "offset {}: {:?}", offset, delay);
        assert!(delay.as_secs() >= 5, "offset {}: {:?}", offset, delay);
    }
}

#[test]
fn lands_just_past_the_boundary() {
    // one second before a 15m close: only the buffer remains
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let to_boundary = 900 - now.timestamp().rem_euclid(900);
    let almost = now + chrono::Duration::seconds(to_boundary - 1);

    let delay = next_close_delay(Timeframe::M15, almost);
    assert!(delay.as_secs() >= 3);
    assert!(delay.as_secs() <= 6);
}

#[test]
fn respects_the_timeframe_period() {
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let delay = next_close_delay(Timeframe::H4, now);
    assert!(delay.as_secs() <= 14_400 + 5);
}
