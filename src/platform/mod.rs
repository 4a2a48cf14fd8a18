// src/platform/mod.rs
//
// Native windowing plumbing shared by the display and input drivers.

pub mod x11;
