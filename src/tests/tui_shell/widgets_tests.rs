use super::*;

#[test]
fn dropdown_height_is_capped_for_huge_option_lists() {
    assert_eq!(dropdown_height(0), 2);
    assert_eq!(dropdown_height(3), 5);
    assert_eq!(dropdown_height(65_536), DROPDOWN_MAX_ROWS + 2);
    assert_eq!(dropdown_height(usize::MAX), DROPDOWN_MAX_ROWS + 2);
}
