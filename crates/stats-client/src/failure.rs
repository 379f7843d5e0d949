// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Failure taxonomy for the fetch pipeline.

use thiserror::Error;

/// The closed set of failure kinds the fetch pipeline can produce.
///
/// All remote and transport errors are translated into one of these
/// variants at the repository boundary; nothing downstream ever observes a
/// raw transport error. The set is exhaustively matchable, so adding a
/// variant forces a review of every consumption point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Failure {
    /// The connectivity check refused the operation before any remote call.
    #[error("network connection unavailable")]
    NetworkConnection,

    /// The remote call failed or returned an error status.
    #[error("server error")]
    ServerError,
}
