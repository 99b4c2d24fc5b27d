// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for WLED JSON responses.
//!
//! Status documents are kept as untyped JSON and projected by key; typed
//! access is available through [`StatusDocument::deserialize`].

mod status;

pub use status::StatusDocument;
