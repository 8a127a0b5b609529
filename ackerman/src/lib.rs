//! # アッカーマン関数の評価器
//!
//! 再帰の深さと呼び出し回数が入力に対して爆発的に増える
//! アッカーマン関数 ack(n, m) を、明示的なスタックと多倍長整数で評価する。
//!
//! ## 利用例
//!
//! ```
//! use ackerman::{EvalError, Evaluator, Limits, Resource};
//! use num::BigUint;
//!
//! assert_eq!(ackerman::evaluate(2, 2), Ok(BigUint::from(7u32)));
//!
//! // ステップ数の上限を超えると ResourceExhausted を返す
//! let evaluator = Evaluator::new(Limits::new(10_000, 10).unwrap());
//! assert_eq!(
//!     evaluator.evaluate(4, 1),
//!     Err(EvalError::ResourceExhausted(Resource::Steps(10)))
//! );
//! ```
pub mod evaluator;
pub mod helper;

pub use evaluator::{
    evaluate, EvalError, Evaluation, Evaluator, Limits, LimitsError, Resource,
    DEFAULT_MAX_STACK_DEPTH, DEFAULT_MAX_STEPS,
};
