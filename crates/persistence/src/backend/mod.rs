// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Connection setup, migrations and the few helpers that cannot be written
//! in Diesel DSL live here. Domain queries and mutations live in `queries/`
//! and `mutations/`.

pub mod sqlite;
