use vim_jumplist::commands::{handle_event, DocumentEvent};
use vim_jumplist::history::{JumpList, Location, Position, Range, TextEdit};
use vim_jumplist::host::{EditorContext, EditorHost, MemoryHost};

fn numbered(count: usize) -> String {
    (1..=count).map(|n| format!("line {}\n", n)).collect()
}

fn register_at(jumps: &mut JumpList, host: &mut MemoryHost, file: &str, line: usize, column: usize) {
    host.navigate(&Location::new(file, Range::empty(Position::new(line, column))))
        .unwrap();
    let ctx = host.active_editor().unwrap();
    jumps.register(&ctx);
}

fn starts(jumps: &JumpList) -> Vec<(String, Position)> {
    jumps
        .points()
        .map(|p| (p.location().file.clone(), p.location().range.start))
        .collect()
}

#[test]
fn test_edit_above_shifts_down() {
    let mut host = MemoryHost::new();
    host.open("a.txt", &numbered(20)).unwrap();
    let mut jumps = JumpList::new(false);
    register_at(&mut jumps, &mut host, "a.txt", 10, 3);

    // Lines 2-3 become four lines
    let edit = host.replace_lines("a.txt", 2, 3, "w\nx\ny\nz").unwrap();
    let moved = handle_event(
        &DocumentEvent::Changed {
            file: "a.txt".to_string(),
            edits: vec![edit],
        },
        &mut jumps,
        &host,
    );

    assert_eq!(moved, 1);
    let point = jumps.points().next().unwrap();
    assert_eq!(point.location().range.start, Position::new(12, 3));
    assert_eq!(point.location().range.end, Position::new(12, 3));
    assert_eq!(point.line_text(), "line 11");
    assert_eq!(host.line_text("a.txt", 12).unwrap(), "line 11");
}

#[test]
fn test_edit_above_shifts_up() {
    let mut host = MemoryHost::new();
    host.open("a.txt", &numbered(20)).unwrap();
    let mut jumps = JumpList::new(false);
    register_at(&mut jumps, &mut host, "a.txt", 10, 0);

    let edit = host.replace_lines("a.txt", 1, 4, "merged").unwrap();
    jumps.on_content_changed("a.txt", &[edit], &host);

    assert_eq!(starts(&jumps)[0].1, Position::new(7, 0));
    assert_eq!(host.line_text("a.txt", 7).unwrap(), "line 11");
}

#[test]
fn test_overlapping_edit_snaps_to_edit_start() {
    let mut host = MemoryHost::new();
    host.open("a.txt", &numbered(20)).unwrap();
    let mut jumps = JumpList::new(false);
    register_at(&mut jumps, &mut host, "a.txt", 10, 4);

    let edit = TextEdit::new(
        Range::new(Position::new(9, 2), Position::new(11, 1)),
        "  rewritten  ",
    );
    host.apply_edits("a.txt", std::slice::from_ref(&edit)).unwrap();
    jumps.on_content_changed("a.txt", &[edit], &host);

    let point = jumps.points().next().unwrap();
    assert_eq!(point.location().range, Range::empty(Position::new(9, 2)));
    assert_eq!(point.line_text(), "li  rewritten  ine 12");
}

#[test]
fn test_snapped_text_follows_later_shift_in_batch() {
    let mut host = MemoryHost::new();
    host.open("a.txt", &numbered(20)).unwrap();
    let mut jumps = JumpList::new(false);
    register_at(&mut jumps, &mut host, "a.txt", 10, 0);

    // Rewrite the point's line, then insert two lines at the top
    let edits = vec![
        TextEdit::new(
            Range::new(Position::new(10, 0), Position::new(10, 7)),
            "HIT",
        ),
        TextEdit::new(Range::empty(Position::new(0, 0)), "x\ny\n"),
    ];
    host.apply_edits("a.txt", &edits).unwrap();
    jumps.on_content_changed("a.txt", &edits, &host);

    let point = jumps.points().next().unwrap();
    assert_eq!(point.location().range.start, Position::new(12, 0));
    assert_eq!(host.line_text("a.txt", 12).unwrap(), "HIT");
    assert_eq!(point.line_text(), "HIT");
}

#[test]
fn test_edit_below_does_not_move() {
    let mut host = MemoryHost::new();
    host.open("a.txt", &numbered(20)).unwrap();
    let mut jumps = JumpList::new(false);
    register_at(&mut jumps, &mut host, "a.txt", 3, 1);

    let edit = host.replace_lines("a.txt", 8, 8, "a\nb\nc").unwrap();
    assert_eq!(jumps.on_content_changed("a.txt", &[edit], &host), 0);
    assert_eq!(starts(&jumps)[0].1, Position::new(3, 1));
}

#[test]
fn test_edit_only_affects_its_file() {
    let mut host = MemoryHost::new();
    host.open("b.txt", &numbered(20)).unwrap();
    host.open("a.txt", &numbered(20)).unwrap();
    let mut jumps = JumpList::new(false);
    register_at(&mut jumps, &mut host, "a.txt", 10, 0);
    register_at(&mut jumps, &mut host, "b.txt", 10, 0);

    let edit = host.replace_lines("a.txt", 0, 0, "x\ny").unwrap();
    jumps.on_content_changed("a.txt", &[edit], &host);

    assert_eq!(
        starts(&jumps),
        vec![
            ("a.txt".to_string(), Position::new(11, 0)),
            ("b.txt".to_string(), Position::new(10, 0)),
        ]
    );
}

#[test]
fn test_delete_removes_entries_and_resets_current() {
    let mut host = MemoryHost::new();
    host.open("b.txt", &numbered(20)).unwrap();
    host.open("a.txt", &numbered(20)).unwrap();
    let mut jumps = JumpList::new(false);
    register_at(&mut jumps, &mut host, "a.txt", 1, 0);
    register_at(&mut jumps, &mut host, "b.txt", 2, 0);
    register_at(&mut jumps, &mut host, "a.txt", 3, 0);

    // Step back from b.txt:5 onto a.txt:3
    host.navigate(&Location::new("b.txt", Range::empty(Position::new(5, 0))))
        .unwrap();
    let ctx = host.active_editor().unwrap();
    jumps.jump_back(&ctx, &mut host);
    assert_eq!(jumps.current().unwrap().location().file, "a.txt");

    let files = host.delete("a.txt").unwrap();
    let removed = handle_event(&DocumentEvent::Deleted { files }, &mut jumps, &host);

    assert_eq!(removed, 2);
    assert!(jumps.is_live());
    assert!(jumps.points().all(|p| p.location().file == "b.txt"));
    assert_eq!(jumps.len(), 2);
}

#[test]
fn test_delete_directory_removes_contained_files() {
    let mut jumps = JumpList::new(false);
    for file in ["src/a.rs", "src/sub/b.rs", "srcs/c.rs", "README"] {
        jumps.register(&EditorContext {
            file: file.to_string(),
            cursor: Position::new(0, 0),
            line_text: String::new(),
        });
    }

    assert_eq!(jumps.on_files_deleted(&["src".to_string()]), 2);
    let files: Vec<_> = jumps.points().map(|p| p.location().file.clone()).collect();
    assert_eq!(files, vec!["srcs/c.rs", "README"]);
}

#[test]
fn test_rename_preserves_position() {
    let mut host = MemoryHost::new();
    host.open("old.txt", &numbered(20)).unwrap();
    let mut jumps = JumpList::new(false);
    register_at(&mut jumps, &mut host, "old.txt", 4, 2);
    register_at(&mut jumps, &mut host, "old.txt", 8, 5);

    let pairs = host.rename("old.txt", "new.txt").unwrap();
    let renamed = handle_event(&DocumentEvent::Renamed { pairs }, &mut jumps, &host);

    assert_eq!(renamed, 2);
    assert_eq!(
        starts(&jumps),
        vec![
            ("new.txt".to_string(), Position::new(4, 2)),
            ("new.txt".to_string(), Position::new(8, 5)),
        ]
    );
    // The renamed points still navigate
    let ctx = host.active_editor().unwrap();
    jumps.jump_back(&ctx, &mut host);
    assert_eq!(host.active_file(), Some("new.txt"));
}

#[test]
fn test_rename_directory_rewrites_prefix() {
    let mut jumps = JumpList::new(false);
    jumps.register(&EditorContext {
        file: "old/dir/a.rs".to_string(),
        cursor: Position::new(3, 1),
        line_text: String::new(),
    });

    jumps.on_files_renamed(&[("old".to_string(), "new".to_string())]);
    let point = jumps.points().next().unwrap();
    assert_eq!(point.location().file, "new/dir/a.rs");
    assert_eq!(point.location().range.start, Position::new(3, 1));
}

#[test]
fn test_rename_then_register_dedups_against_new_name() {
    let mut jumps = JumpList::new(false);
    let ctx = |file: &str| EditorContext {
        file: file.to_string(),
        cursor: Position::new(2, 0),
        line_text: String::new(),
    };
    jumps.register(&ctx("a.rs"));
    jumps.on_files_renamed(&[("a.rs".to_string(), "b.rs".to_string())]);
    jumps.register(&ctx("b.rs"));
    assert_eq!(jumps.len(), 1);
}
