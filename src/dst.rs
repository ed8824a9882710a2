//! Resolution of civil candidates into absolute instants around DST transitions.
//!
//! A matching civil time can be nonexistent (clocks jump forward) or ambiguous (clocks fall back
//! and the time repeats). [`LeapPolicy`] and [`FallPolicy`] decide how many instants such time
//! produces; the search itself is unaffected.

use crate::{
    options::{FallPolicy, LeapPolicy, Options},
    search::Fields,
};
use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Timelike};
use tracing::trace;

/// Returns the first firing instant strictly after `from`, in the time zone of `from`.
pub(crate) fn next_instant<Tz: TimeZone>(fields: &Fields, options: Options, from: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let tz = from.timezone();
    let civil = from.naive_local().with_nanosecond(0)?;

    // On the first pass through a repeated hour, second occurrences of the civil times
    // passed since the transition are still ahead.
    let mut start = match tz.from_local_datetime(&civil) {
        LocalResult::Ambiguous(early, late) if *from < late => civil - (late.naive_utc() - early.naive_utc()),
        _ => civil,
    };
    // Shortly after a gap, shifted gap times may still be ahead of earlier real ones.
    if options.leap == LeapPolicy::Unskip {
        let gap = from.offset().fix().local_minus_utc() - offset_before(&tz, &civil).local_minus_utc();
        if gap > 0 {
            start = start.min(civil - TimeDelta::seconds(gap.into()));
        }
    }

    let mut candidate = fields.next_civil(start, true)?;
    loop {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(instant) if instant > *from => return Some(instant),
            LocalResult::Single(_) => {}
            LocalResult::Ambiguous(early, late) => {
                if options.fall.fires_early() && early > *from {
                    trace!(civil = ?candidate, "repeated local time, first occurrence");
                    return Some(early);
                }
                if options.fall.fires_late() && late > *from {
                    trace!(civil = ?candidate, "repeated local time, second occurrence");
                    return match options.fall {
                        FallPolicy::FireBoth => Some(earliest_first_occurrence(fields, &tz, candidate, from, late)),
                        _ => Some(late),
                    };
                }
            }
            LocalResult::None => match options.leap {
                LeapPolicy::Skip => trace!(civil = ?candidate, "nonexistent local time skipped"),
                LeapPolicy::Unskip => {
                    let shifted = shift_past_gap(&tz, &candidate);
                    if shifted > *from {
                        trace!(civil = ?candidate, instant = ?shifted.naive_utc(), "nonexistent local time shifted by the gap");
                        return Some(earliest_after_gap(fields, &tz, candidate, from, shifted));
                    }
                }
            },
        }

        candidate = fields.next_civil(candidate, false)?;
    }
}

/// Looks for a first occurrence inside the same repeated hour which fires before `late`.
fn earliest_first_occurrence<Tz: TimeZone>(
    fields: &Fields,
    tz: &Tz,
    mut candidate: NaiveDateTime,
    from: &DateTime<Tz>,
    late: DateTime<Tz>,
) -> DateTime<Tz> {
    while let Some(next) = fields.next_civil(candidate, false) {
        let LocalResult::Ambiguous(early, _) = tz.from_local_datetime(&next) else {
            break;
        };
        if early > *from {
            return early.min(late);
        }
        candidate = next;
    }

    late
}

/// Looks for a real local time after the gap which fires before the `shifted` gap time.
fn earliest_after_gap<Tz: TimeZone>(
    fields: &Fields,
    tz: &Tz,
    mut candidate: NaiveDateTime,
    from: &DateTime<Tz>,
    shifted: DateTime<Tz>,
) -> DateTime<Tz> {
    let limit = shifted.naive_local();
    while let Some(next) = fields.next_civil(candidate, false) {
        if next >= limit {
            break;
        }
        match tz.from_local_datetime(&next) {
            LocalResult::Single(instant) if instant > *from => return instant,
            LocalResult::Ambiguous(..) => break,
            _ => {}
        }
        candidate = next;
    }

    shifted
}

/// Offset in effect a day before `civil`, read as UTC, so it's never inside the transition.
fn offset_before<Tz: TimeZone>(tz: &Tz, civil: &NaiveDateTime) -> FixedOffset {
    tz.offset_from_utc_datetime(&(*civil - TimeDelta::days(1))).fix()
}

/// Maps a civil time swallowed by a DST gap to the instant it would denote with the offset in
/// effect before the gap, i.e. the wall clock moved forward by the gap length.
fn shift_past_gap<Tz: TimeZone>(tz: &Tz, civil: &NaiveDateTime) -> DateTime<Tz> {
    let before = offset_before(tz, civil);
    tz.from_utc_datetime(&(*civil - TimeDelta::seconds(before.local_minus_utc().into())))
}
