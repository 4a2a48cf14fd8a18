// src/keysym_table.rs

//! Translation of backend key symbols (X11 keysym values) to normalized key
//! codes.
//!
//! The table is sorted by keysym and searched with a binary search. Keysyms
//! not in the table pass through unchanged, which covers every Latin-1
//! printable key since X11 assigns those their character code. An entry
//! mapping to 0 marks a key whose events are suppressed.

use crate::keys::*;

/// `(keysym, key code)` pairs, strictly ascending by keysym.
pub static KEYSYM_TABLE: &[(u32, i32)] = &[
    (0xfe03, KEY_RALT),      // ISO_Level3_Shift (AltGr)
    (0xfe20, KEY_TAB),       // ISO_Left_Tab
    (0xff08, KEY_BACKSPACE), // BackSpace
    (0xff09, KEY_TAB),       // Tab
    (0xff0d, KEY_ENTER),     // Return
    (0xff13, 0),             // Pause
    (0xff14, KEY_SCRL),      // Scroll_Lock
    (0xff1b, KEY_ESCAPE),    // Escape
    (0xff20, 0),             // Multi_key
    (0xff50, KEY_HOME),      // Home
    (0xff51, KEY_LEFT),      // Left
    (0xff52, KEY_UP),        // Up
    (0xff53, KEY_RIGHT),     // Right
    (0xff54, KEY_DOWN),      // Down
    (0xff55, KEY_PGUP),      // Prior
    (0xff56, KEY_PGDN),      // Next
    (0xff57, KEY_END),       // End
    (0xff61, 0),             // Print
    (0xff63, KEY_INSERT),    // Insert
    (0xff67, KEY_MENU),      // Menu
    (0xff7e, 0),             // Mode_switch
    (0xff7f, KEY_NUML),      // Num_Lock
    (0xff8d, KEY_ENTER),     // KP_Enter
    (0xff95, KEY_HOME),      // KP_Home
    (0xff96, KEY_LEFT),      // KP_Left
    (0xff97, KEY_UP),        // KP_Up
    (0xff98, KEY_RIGHT),     // KP_Right
    (0xff99, KEY_DOWN),      // KP_Down
    (0xff9a, KEY_PGUP),      // KP_Prior
    (0xff9b, KEY_PGDN),      // KP_Next
    (0xff9c, KEY_END),       // KP_End
    (0xff9d, 0),             // KP_Begin
    (0xff9e, KEY_INSERT),    // KP_Insert
    (0xff9f, KEY_DELETE),    // KP_Delete
    (0xffaa, '*' as i32),    // KP_Multiply
    (0xffab, '+' as i32),    // KP_Add
    (0xffac, ',' as i32),    // KP_Separator
    (0xffad, '-' as i32),    // KP_Subtract
    (0xffae, '.' as i32),    // KP_Decimal
    (0xffaf, '/' as i32),    // KP_Divide
    (0xffb0, '0' as i32),    // KP_0
    (0xffb1, '1' as i32),
    (0xffb2, '2' as i32),
    (0xffb3, '3' as i32),
    (0xffb4, '4' as i32),
    (0xffb5, '5' as i32),
    (0xffb6, '6' as i32),
    (0xffb7, '7' as i32),
    (0xffb8, '8' as i32),
    (0xffb9, '9' as i32),    // KP_9
    (0xffbd, '=' as i32),    // KP_Equal
    (0xffbe, KEY_F0 + 1),    // F1
    (0xffbf, KEY_F0 + 2),
    (0xffc0, KEY_F0 + 3),
    (0xffc1, KEY_F0 + 4),
    (0xffc2, KEY_F0 + 5),
    (0xffc3, KEY_F0 + 6),
    (0xffc4, KEY_F0 + 7),
    (0xffc5, KEY_F0 + 8),
    (0xffc6, KEY_F0 + 9),
    (0xffc7, KEY_F0 + 10),
    (0xffc8, KEY_F0 + 11),
    (0xffc9, KEY_F0 + 12),
    (0xffca, KEY_F0 + 13),
    (0xffcb, KEY_F0 + 14),
    (0xffcc, KEY_F0 + 15),   // F15
    (0xffe1, KEY_LSHIFT),    // Shift_L
    (0xffe2, KEY_RSHIFT),    // Shift_R
    (0xffe3, KEY_LCTRL),     // Control_L
    (0xffe4, KEY_RCTRL),     // Control_R
    (0xffe5, KEY_CAPSL),     // Caps_Lock
    (0xffe6, 0),             // Shift_Lock
    (0xffe7, KEY_LALT),      // Meta_L
    (0xffe8, KEY_RALT),      // Meta_R
    (0xffe9, KEY_LALT),      // Alt_L
    (0xffea, KEY_RALT),      // Alt_R
    (0xffeb, KEY_LWIN),      // Super_L
    (0xffec, KEY_RWIN),      // Super_R
    (0xffff, KEY_DELETE),    // Delete
];

/// Translates a backend key symbol to a normalized key code.
///
/// An exact table match wins; otherwise the keysym is returned unchanged.
pub fn translate_keysym(sym: u32) -> i32 {
    match KEYSYM_TABLE.binary_search_by_key(&sym, |&(k, _)| k) {
        Ok(idx) => KEYSYM_TABLE[idx].1,
        Err(_) => sym as i32,
    }
}
