use super::*;

#[test]
fn edits_at_cursor_with_multibyte_chars() {
    let mut input = Input::default();
    for c in "sóz".chars() {
        input.insert_char(c);
    }
    assert_eq!(input.cursor, 3);
    input.move_left();
    input.backspace();
    assert_eq!(input.buf, "sz");
    input.insert_char('ö');
    assert_eq!(input.buf, "söz");
    input.delete();
    assert_eq!(input.buf, "sö");
    input.move_right();
    input.move_right();
    assert_eq!(input.cursor, 2);
}

#[test]
fn masked_hides_every_char() {
    let mut input = Input::default();
    input.set("pässword");
    assert_eq!(input.masked(), "********");
    input.clear();
    assert_eq!(input.masked(), "");
}
