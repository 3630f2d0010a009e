// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the API crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod calendar_tests;
mod helpers;
mod reservation_tests;
