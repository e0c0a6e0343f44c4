// extensions/mod.rs
//
// Optional extension modules for NovaEngine.
// Decoupled from core Entity/Scene storage; games opt in through EngineContext::tweens.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec3, ease, ease_vec3};
pub use tween::{TweenState, Tween, TweenId, TweenTarget, TweenGroupId};
