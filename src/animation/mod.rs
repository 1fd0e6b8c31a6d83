// SPDX-License-Identifier: MPL-2.0
//! Loaded animation documents and their playback metadata.

mod lottie;
mod source;

pub use lottie::LottieHeader;
pub use source::AnimationSource;
