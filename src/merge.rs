//! Turning drafts into weeks and weeks into drafts.
//!
//! Overnight draft ranges are split at midnight: the evening half stays on the
//! selected day and the morning half spills into the next day. Selected days
//! are overwritten; days that only receive spillover keep their existing hours
//! and gain the spilled range.

use crate::config::HoursConfig;
use crate::day::DayKey;
use crate::draft::{Draft, DraftMode, DraftRange, DraftRangeKind};
use crate::range::{normalize_and_merge, TimeRange};
use crate::time_of_day::MINUTES_PER_DAY;
use crate::week::{same_day_hours, DayHours, WeekHours};
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet};

/// Raw per-day contributions of `ranges` applied to every selected day.
/// Incomplete and zero-length draft ranges contribute nothing.
pub fn expand_per_day(
    selected_days: &BTreeSet<DayKey>,
    ranges: &[DraftRange],
) -> BTreeMap<DayKey, Vec<TimeRange>> {
    let mut per_day: BTreeMap<DayKey, Vec<TimeRange>> = BTreeMap::new();

    for &day in selected_days {
        for range in ranges {
            match range.kind() {
                DraftRangeKind::Regular(r) => per_day.entry(day).or_default().push(r),
                DraftRangeKind::Overnight { start, end } => {
                    per_day
                        .entry(day)
                        .or_default()
                        .push(TimeRange::new(start, MINUTES_PER_DAY));
                    per_day
                        .entry(day.next())
                        .or_default()
                        .push(TimeRange::new(0, end));
                }
                DraftRangeKind::Empty | DraftRangeKind::Incomplete => {}
            }
        }
    }
    per_day
}

fn ends_at_midnight(hours: &DayHours) -> bool {
    normalize_and_merge(hours.ranges())
        .last()
        .map_or(false, |r| r.end == MINUTES_PER_DAY)
}

fn starts_at_midnight(hours: &DayHours) -> Option<TimeRange> {
    normalize_and_merge(hours.ranges())
        .first()
        .copied()
        .filter(|r| r.start == 0)
}

/// The morning range of `day` that belongs to the previous day's overnight
/// period. Only a single-day draft hides it, so only then is it kept.
fn owned_tail(
    week: &WeekHours,
    selected_days: &BTreeSet<DayKey>,
    day: DayKey,
) -> Option<TimeRange> {
    if selected_days.len() != 1 || !ends_at_midnight(&week[day.prev()]) {
        return None;
    }
    starts_at_midnight(&week[day])
}

/// Produce a new week with `draft` applied. Never fails; degenerate ranges
/// are dropped and a selected day left without ranges becomes `Closed`.
pub fn apply_draft_to_week(week: &WeekHours, draft: &Draft) -> WeekHours {
    debug!(
        "applying {:?} draft to {:?}",
        draft.mode, draft.selected_days
    );

    let mut result = week.clone();
    match draft.mode {
        DraftMode::Closed => {
            for &day in &draft.selected_days {
                result.set(day, DayHours::Closed);
            }
        }
        DraftMode::Open24 => {
            for &day in &draft.selected_days {
                result.set(day, DayHours::Open24);
            }
        }
        DraftMode::Ranges => {
            let per_day = expand_per_day(&draft.selected_days, &draft.ranges);

            for &day in &draft.selected_days {
                let mut contributions = per_day.get(&day).cloned().unwrap_or_default();
                if let Some(tail) = owned_tail(week, &draft.selected_days, day) {
                    trace!("keeping {} overnight tail {:?} on {}", day.prev(), tail, day);
                    contributions.push(tail);
                }
                result.set(day, DayHours::from_ranges(&contributions));
            }

            for (&day, spill) in per_day.iter() {
                if draft.selected_days.contains(&day) {
                    continue;
                }
                trace!("spilling {:?} into {}", spill, day);
                let merged = match &week[day] {
                    DayHours::Open24 => DayHours::Open24,
                    DayHours::Closed => DayHours::from_ranges(spill),
                    DayHours::Ranges { ranges } => {
                        let mut all = ranges.clone();
                        all.extend_from_slice(spill);
                        DayHours::from_ranges(&all)
                    }
                };
                result.set(day, merged);
            }
        }
    }
    result
}

/// Seed a draft for the given selection using the default config.
pub fn build_draft(selected_days: &BTreeSet<DayKey>, week: &WeekHours) -> Draft {
    build_draft_with(&HoursConfig::default(), selected_days, week)
}

pub fn build_draft_with(
    config: &HoursConfig,
    selected_days: &BTreeSet<DayKey>,
    week: &WeekHours,
) -> Draft {
    let mut days = selected_days.iter().copied();
    match (days.next(), days.next()) {
        (Some(day), None) => seed_single_day(config, day, week),
        (Some(first), Some(_)) => {
            let common = &week[first];
            if selected_days.iter().all(|&d| same_day_hours(&week[d], common)) {
                seed_from_hours(config, selected_days.clone(), common)
            } else {
                default_draft(config, selected_days.clone())
            }
        }
        (None, _) => default_draft(config, BTreeSet::new()),
    }
}

fn default_draft(config: &HoursConfig, selected_days: BTreeSet<DayKey>) -> Draft {
    Draft::new(
        selected_days,
        DraftMode::Ranges,
        vec![config.default_range().into()],
    )
}

fn seed_from_hours(
    config: &HoursConfig,
    selected_days: BTreeSet<DayKey>,
    hours: &DayHours,
) -> Draft {
    let fallback = vec![config.default_range().into()];
    match hours {
        DayHours::Closed => Draft::new(selected_days, DraftMode::Closed, fallback),
        DayHours::Open24 => Draft::new(selected_days, DraftMode::Open24, fallback),
        DayHours::Ranges { ranges } => {
            let ranges = normalize_and_merge(ranges);
            if ranges.is_empty() {
                return seed_from_hours(config, selected_days, &DayHours::Closed);
            }
            Draft::new(
                selected_days,
                DraftMode::Ranges,
                ranges.into_iter().map(DraftRange::from).collect(),
            )
        }
    }
}

fn seed_single_day(config: &HoursConfig, day: DayKey, week: &WeekHours) -> Draft {
    let selected = BTreeSet::from([day]);
    let ranges = match &week[day] {
        DayHours::Ranges { ranges } => normalize_and_merge(ranges),
        other => return seed_from_hours(config, selected, other),
    };

    let hide_tail = ends_at_midnight(&week[day.prev()]);
    let own: Vec<TimeRange> = ranges
        .into_iter()
        .filter(|r| {
            let is_tail = hide_tail && r.start == 0;
            if is_tail {
                debug!("{}: hiding {:?}, owned by {}", day, r, day.prev());
            }
            !is_tail
        })
        .collect();
    if own.is_empty() {
        return seed_from_hours(config, selected, &DayHours::Closed);
    }

    let next_head = starts_at_midnight(&week[day.next()]);
    let draft_ranges = own
        .into_iter()
        .map(|r| match next_head {
            Some(head) if r.end == MINUTES_PER_DAY && head.end < r.start => {
                debug!("{}: joining {:?} with {} {:?}", day, r, day.next(), head);
                DraftRange::new(r.start, head.end)
            }
            _ => DraftRange::from(r),
        })
        .collect();

    Draft::new(selected, DraftMode::Ranges, draft_ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::week::default_week_hours;

    fn r(start: u32, end: u32) -> TimeRange {
        TimeRange::new(start, end)
    }

    fn days(list: &[DayKey]) -> BTreeSet<DayKey> {
        list.iter().copied().collect()
    }

    fn closed_week() -> WeekHours {
        WeekHours::from_fn(|_| DayHours::Closed)
    }

    #[test]
    fn test_overnight_split() {
        let per_day = expand_per_day(&days(&[DayKey::Mon]), &[DraftRange::new(22 * 60, 2 * 60)]);
        assert_eq!(per_day.len(), 2);
        assert_eq!(per_day[&DayKey::Mon], vec![r(1320, 1440)]);
        assert_eq!(per_day[&DayKey::Tue], vec![r(0, 120)]);
    }

    #[test]
    fn test_overnight_wraps_week() {
        let per_day = expand_per_day(&days(&[DayKey::Sun]), &[DraftRange::new(1380, 60)]);
        assert_eq!(per_day[&DayKey::Mon], vec![r(0, 60)]);
    }

    #[test]
    fn test_expand_skips_unusable() {
        let per_day = expand_per_day(
            &days(&[DayKey::Wed]),
            &[DraftRange::new(600, 600), DraftRange { start: None, end: Some(60) }],
        );
        assert!(per_day.is_empty());
    }

    #[test]
    fn test_spillover_non_destructive() {
        let week = closed_week().with_day(DayKey::Tue, DayHours::from_ranges(&[r(480, 600)]));
        let draft = Draft::new(
            days(&[DayKey::Mon]),
            DraftMode::Ranges,
            vec![DraftRange::new(1320, 120)],
        );

        let out = apply_draft_to_week(&week, &draft);
        assert_eq!(out[DayKey::Mon], DayHours::from_ranges(&[r(1320, 1440)]));
        assert_eq!(
            out[DayKey::Tue],
            DayHours::Ranges {
                ranges: vec![r(0, 120), r(480, 600)]
            }
        );
        // input untouched
        assert_eq!(week[DayKey::Mon], DayHours::Closed);
    }

    #[test]
    fn test_spillover_into_open24() {
        let week = closed_week().with_day(DayKey::Sat, DayHours::Open24);
        let draft = Draft::new(
            days(&[DayKey::Fri]),
            DraftMode::Ranges,
            vec![DraftRange::new(1200, 180)],
        );

        let out = apply_draft_to_week(&week, &draft);
        assert_eq!(out[DayKey::Sat], DayHours::Open24);
        assert_eq!(out[DayKey::Fri], DayHours::from_ranges(&[r(1200, 1440)]));
    }

    #[test]
    fn test_spill_between_selected_days() {
        let draft = Draft::new(
            days(&[DayKey::Fri, DayKey::Sat]),
            DraftMode::Ranges,
            vec![DraftRange::new(1080, 120)],
        );
        let out = apply_draft_to_week(&default_week_hours(), &draft);
        assert_eq!(out[DayKey::Fri], DayHours::from_ranges(&[r(1080, 1440)]));
        assert_eq!(out[DayKey::Sat], DayHours::from_ranges(&[r(0, 120), r(1080, 1440)]));
        assert_eq!(out[DayKey::Sun], DayHours::from_ranges(&[r(0, 120)]));
    }

    #[test]
    fn test_collapse_to_closed() {
        let draft = Draft::new(
            days(&[DayKey::Mon]),
            DraftMode::Ranges,
            vec![DraftRange::new(600, 600)],
        );
        let out = apply_draft_to_week(&default_week_hours(), &draft);
        assert_eq!(out[DayKey::Mon], DayHours::Closed);
    }

    #[test]
    fn test_closed_and_open24_modes() {
        let week = default_week_hours();
        let mut draft = Draft::new(
            days(&[DayKey::Mon, DayKey::Sat]),
            DraftMode::Open24,
            vec![DraftRange::new(1320, 120)],
        );
        let out = apply_draft_to_week(&week, &draft);
        assert_eq!(out[DayKey::Mon], DayHours::Open24);
        assert_eq!(out[DayKey::Sat], DayHours::Open24);
        assert_eq!(out[DayKey::Tue], week[DayKey::Tue]);
        assert_eq!(out[DayKey::Sun], DayHours::Closed);

        draft.set_mode(DraftMode::Closed);
        let out = apply_draft_to_week(&week, &draft);
        assert_eq!(out[DayKey::Mon], DayHours::Closed);
    }

    #[test]
    fn test_multi_day_scenario() {
        let week = default_week_hours().with_day(DayKey::Mon, DayHours::Closed);
        let draft = Draft::new(
            days(&[DayKey::Mon, DayKey::Tue, DayKey::Wed]),
            DraftMode::Ranges,
            vec![DraftRange::new(540, 990)],
        );
        let out = apply_draft_to_week(&week, &draft);
        for day in [DayKey::Mon, DayKey::Tue, DayKey::Wed] {
            assert_eq!(out[day], DayHours::Ranges { ranges: vec![r(540, 990)] });
        }
        for day in [DayKey::Thu, DayKey::Fri, DayKey::Sat, DayKey::Sun] {
            assert_eq!(out[day], week[day]);
        }
    }

    #[test]
    fn test_editing_keeps_neighbor_tail() {
        let week = closed_week()
            .with_day(DayKey::Mon, DayHours::from_ranges(&[r(1320, 1440)]))
            .with_day(DayKey::Tue, DayHours::from_ranges(&[r(0, 120), r(600, 900)]));

        let mut draft = build_draft(&days(&[DayKey::Tue]), &week);
        assert_eq!(draft.ranges, vec![DraftRange::new(600, 900)]);

        draft.update_range(0, DraftRange::new(660, 960)).unwrap();
        let out = apply_draft_to_week(&week, &draft);
        assert_eq!(out[DayKey::Tue], DayHours::from_ranges(&[r(0, 120), r(660, 960)]));
        assert_eq!(out[DayKey::Mon], week[DayKey::Mon]);
    }

    #[test]
    fn test_multi_day_edit_overwrites_tail() {
        let week = closed_week()
            .with_day(DayKey::Mon, DayHours::from_ranges(&[r(1320, 1440)]))
            .with_day(DayKey::Tue, DayHours::from_ranges(&[r(0, 120), r(600, 900)]))
            .with_day(DayKey::Thu, DayHours::from_ranges(&[r(0, 120), r(600, 900)]));

        let mut draft = build_draft(&days(&[DayKey::Tue, DayKey::Thu]), &week);
        assert_eq!(
            draft.ranges,
            vec![DraftRange::new(0, 120), DraftRange::new(600, 900)]
        );

        draft.remove_range(0).unwrap();
        let out = apply_draft_to_week(&week, &draft);
        assert_eq!(out[DayKey::Tue], DayHours::from_ranges(&[r(600, 900)]));
        assert_eq!(out[DayKey::Thu], out[DayKey::Tue]);
        assert_eq!(out[DayKey::Mon], week[DayKey::Mon]);
    }

    #[test]
    fn test_seed_round_trip() {
        let week = closed_week()
            .with_day(DayKey::Sun, DayHours::from_ranges(&[r(600, 720), r(1320, 1440)]))
            .with_day(DayKey::Mon, DayHours::from_ranges(&[r(0, 180)]));

        let draft = build_draft(&days(&[DayKey::Sun]), &week);
        assert_eq!(draft.mode, DraftMode::Ranges);
        assert_eq!(
            draft.ranges,
            vec![DraftRange::new(600, 720), DraftRange::new(1320, 180)]
        );

        let out = apply_draft_to_week(&week, &draft);
        assert_eq!(out, week);
    }

    #[test]
    fn test_seed_hides_tail_only_day() {
        let week = closed_week()
            .with_day(DayKey::Wed, DayHours::from_ranges(&[r(1260, 1440)]))
            .with_day(DayKey::Thu, DayHours::from_ranges(&[r(0, 60)]));

        let draft = build_draft(&days(&[DayKey::Thu]), &week);
        assert_eq!(draft.mode, DraftMode::Closed);

        // saving the untouched draft keeps the tail
        let untouched = Draft {
            mode: DraftMode::Ranges,
            ranges: vec![],
            ..draft
        };
        let out = apply_draft_to_week(&week, &untouched);
        assert_eq!(out[DayKey::Thu], DayHours::from_ranges(&[r(0, 60)]));
    }

    #[test]
    fn test_seed_no_join_without_overnight_shape() {
        let week = closed_week()
            .with_day(DayKey::Tue, DayHours::from_ranges(&[r(600, 1440)]))
            .with_day(DayKey::Wed, DayHours::from_ranges(&[r(0, 700)]));

        let draft = build_draft(&days(&[DayKey::Tue]), &week);
        assert_eq!(draft.ranges, vec![DraftRange::new(600, 1440)]);
    }

    #[test]
    fn test_seed_multi_day() {
        let week = default_week_hours();

        let same = build_draft(&days(&[DayKey::Mon, DayKey::Fri]), &week);
        assert_eq!(same.mode, DraftMode::Ranges);
        assert_eq!(same.ranges, vec![DraftRange::new(540, 1050)]);

        let weekend = build_draft(&days(&[DayKey::Sat, DayKey::Sun]), &week);
        assert_eq!(weekend.mode, DraftMode::Closed);

        let mixed = build_draft(&days(&[DayKey::Fri, DayKey::Sat]), &week);
        assert_eq!(mixed.mode, DraftMode::Ranges);
        assert_eq!(mixed.ranges, vec![DraftRange::new(540, 1050)]);
        assert_eq!(mixed.selected_days, days(&[DayKey::Fri, DayKey::Sat]));
    }

    #[test]
    fn test_seed_uses_config_default() {
        let config = HoursConfig {
            opens_at: 600,
            closes_at: 1200,
            ..HoursConfig::default()
        };
        let week = default_week_hours().with_day(DayKey::Tue, DayHours::Open24);
        let draft = build_draft_with(&config, &days(&[DayKey::Mon, DayKey::Tue]), &week);
        assert_eq!(draft.ranges, vec![DraftRange::new(600, 1200)]);

        let single = build_draft_with(&config, &days(&[DayKey::Tue]), &week);
        assert_eq!(single.mode, DraftMode::Open24);
    }
}
