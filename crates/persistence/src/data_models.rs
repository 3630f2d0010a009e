// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// An administrator account as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub access_level: i32,
}
