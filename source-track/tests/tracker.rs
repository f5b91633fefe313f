use proptest::prelude::*;
use source_track::position_at;
use source_track::Modification;
use source_track::Position;
use source_track::SourcePositionTracker;

/// Every original offset must map to a position that agrees with a fresh scan of the live text.
fn assert_consistent_with_live_scan(tracker: &SourcePositionTracker) {
  let live = tracker.live_text();
  for offset in 0..tracker.original_len() {
    let pos = tracker.from_original_offset(offset).unwrap();
    assert_eq!(
      position_at(&live, pos.offset),
      Some(pos),
      "original offset {offset} mapped to {pos:?} in {live:?}"
    );
  }
}

#[test]
fn lookups_without_edits_match_linear_scan() {
  let src = "1 + 2;\n\n'a' + 'b';\n  3";
  let tracker = SourcePositionTracker::new(src);
  assert!(tracker.modifications().is_empty());
  assert_eq!(tracker.original_len(), src.chars().count() + 1);
  for offset in 0..tracker.original_len() {
    assert_eq!(
      tracker.from_original_offset(offset).ok(),
      position_at(src, offset)
    );
  }
}

#[test]
fn replacing_a_range_keeps_later_offsets_valid() {
  let src = "1 + 2 + 3;\nx";
  let mut tracker = SourcePositionTracker::new(src);
  // Reduce `1 + 2` to `3`.
  tracker.remove(0, 5).unwrap();
  tracker.insert(0, "3").unwrap();
  assert_eq!(tracker.live_text(), "3 + 3;\nx");

  assert_eq!(tracker.from_original_offset(0).unwrap(), Position::new(0, 0, 0));
  // Second `3` and the end of the whole expression.
  assert_eq!(tracker.from_original_offset(8).unwrap(), Position::new(4, 0, 4));
  assert_eq!(tracker.from_original_offset(9).unwrap(), Position::new(5, 0, 5));
  // `x` on the next line keeps its line and column.
  assert_eq!(tracker.from_original_offset(11).unwrap(), Position::new(7, 1, 0));
  // Offsets inside the replaced range collapse onto its start.
  assert_eq!(tracker.from_original_offset(3).unwrap(), Position::new(0, 0, 0));
  assert_consistent_with_live_scan(&tracker);
}

#[test]
fn inserting_line_breaks_moves_later_text_down() {
  let mut tracker = SourcePositionTracker::new("ab cd\nef");
  tracker.insert(2, "\n\n").unwrap();
  assert_eq!(tracker.live_text(), "ab\n\n cd\nef");
  assert_eq!(tracker.from_original_offset(3).unwrap(), Position::new(5, 2, 1));
  assert_eq!(tracker.from_original_offset(6).unwrap(), Position::new(8, 3, 0));
  assert_consistent_with_live_scan(&tracker);
}

#[test]
fn removing_line_breaks_moves_later_text_up() {
  let mut tracker = SourcePositionTracker::new("ab\n\ncd\nef");
  tracker.remove(1, 5).unwrap();
  assert_eq!(tracker.live_text(), "ad\nef");
  assert_eq!(tracker.from_original_offset(5).unwrap(), Position::new(1, 0, 1));
  assert_eq!(tracker.from_original_offset(7).unwrap(), Position::new(3, 1, 0));
  assert_consistent_with_live_scan(&tracker);
}

#[test]
fn later_edits_use_positions_produced_by_earlier_ones() {
  let mut tracker = SourcePositionTracker::new("'a' + 'b' + 'c'");
  tracker.remove(2, 7).unwrap();
  assert_eq!(tracker.live_text(), "'ab' + 'c'");
  tracker.remove(3, 8).unwrap();
  assert_eq!(tracker.live_text(), "'abc'");
  assert_eq!(tracker.from_original_offset(0).unwrap().offset, 0);
  assert_eq!(tracker.from_original_offset(15).unwrap().offset, 5);
  assert_consistent_with_live_scan(&tracker);
}

#[test]
fn thousand_single_char_inserts_stay_consistent() {
  let src = "let a = 1;\nlet b = 'two';\n\nconsole.log(a + b);\n";
  let mut tracker = SourcePositionTracker::new(src);
  for i in 0..1000usize {
    let live_len = tracker.live_len();
    let offset = (i * 7919) % (live_len + 1);
    let text = if i % 5 == 0 { "\n" } else { "x" };
    tracker.insert(offset, text).unwrap();
  }
  assert_eq!(tracker.modifications().len(), 1000);
  assert_eq!(tracker.live_len(), src.chars().count() + 1000);
  assert_consistent_with_live_scan(&tracker);
}

#[derive(Clone, Debug)]
enum Edit {
  Insert { at: usize, text: String },
  Remove { at: usize, len: usize },
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
  prop_oneof![
    (any::<usize>(), "[ab\n]{1,4}").prop_map(|(at, text)| Edit::Insert { at, text }),
    (any::<usize>(), 0usize..5).prop_map(|(at, len)| Edit::Remove { at, len }),
  ]
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn random_edits_stay_consistent_with_live_scan(
    src in "[xy\n]{0,24}",
    edits in prop::collection::vec(edit_strategy(), 0..24),
  ) {
    let mut tracker = SourcePositionTracker::new(&src);
    for edit in edits {
      let live_len = tracker.live_len();
      match edit {
        Edit::Insert { at, text } => tracker.insert(at % (live_len + 1), &text).unwrap(),
        Edit::Remove { at, len } => {
          let start = at % (live_len + 1);
          let end = (start + len).min(live_len);
          tracker.remove(start, end).unwrap();
        }
      }
    }
    let live = tracker.live_text();
    for offset in 0..tracker.original_len() {
      let pos = tracker.from_original_offset(offset).unwrap();
      prop_assert_eq!(position_at(&live, pos.offset), Some(pos));
    }
  }

  #[test]
  fn remove_undoes_insert(
    src in "[xy\n]{0,24}",
    start in any::<usize>(),
    probe in any::<usize>(),
    inserted in "[ab\n]{1,6}",
  ) {
    let len = src.chars().count();
    let start = position_at(&src, start % (len + 1)).unwrap();
    let probe = position_at(&src, probe % (len + 1)).unwrap();
    let insert = Modification::insert(start, inserted);
    prop_assert_eq!(insert.inverse().apply(insert.apply(probe)), probe);
  }
}
