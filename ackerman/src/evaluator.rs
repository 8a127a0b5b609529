//! 明示的なスタックを用いたアッカーマン関数の評価器
//!
//! 再帰呼び出しの代わりにフレームのスタックをヒープ上に持つため、
//! ネイティブのコールスタックの大きさに依存しない。
//! スタックの深さと評価ステップ数は [`Limits`] で制限される。
use crate::helper::safe_add;
use log::debug;
use num::{BigInt, BigUint, One, Signed, ToPrimitive, Zero};
use std::{
    error::Error,
    fmt::{self, Display},
    mem,
};

/// スタックの深さの既定の上限
pub const DEFAULT_MAX_STACK_DEPTH: usize = 10_000;

/// 評価ステップ数の既定の上限
pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

/// 制限値の設定エラーを表す型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitsError {
    ZeroStackDepth,
    ZeroSteps,
}

impl Display for LimitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LimitsError: {self:?}")
    }
}

impl Error for LimitsError {}

/// 評価時の資源制限。どちらも正の値。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    max_stack_depth: usize,
    max_steps: u64,
}

impl Limits {
    pub fn new(max_stack_depth: usize, max_steps: u64) -> Result<Self, LimitsError> {
        if max_stack_depth == 0 {
            return Err(LimitsError::ZeroStackDepth);
        }
        if max_steps == 0 {
            return Err(LimitsError::ZeroSteps);
        }

        Ok(Self {
            max_stack_depth,
            max_steps,
        })
    }

    pub fn max_stack_depth(&self) -> usize {
        self.max_stack_depth
    }

    pub fn max_steps(&self) -> u64 {
        self.max_steps
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// 上限を超えた資源。値は設定されていた上限。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    StackDepth(usize),
    Steps(u64),
}

/// 評価エラーを表す型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// 引数が負。フレームを作る前に返される。
    Domain { n: BigInt, m: BigInt },
    /// スタックの深さかステップ数が上限を超えた
    ResourceExhausted(Resource),
}

impl Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Domain { n, m } => write!(
                f,
                "DomainError: 引数は非負整数でなければならない (n = {n}, m = {m})"
            ),
            EvalError::ResourceExhausted(Resource::StackDepth(limit)) => write!(
                f,
                "ResourceExhausted: スタックの深さが上限 {limit} を超えた"
            ),
            EvalError::ResourceExhausted(Resource::Steps(limit)) => {
                write!(f, "ResourceExhausted: ステップ数が上限 {limit} を超えた")
            }
        }
    }
}

impl Error for EvalError {}

/// 評価結果と、評価に要した資源
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub value: BigUint,
    pub steps: u64,       // 素朴な再帰での呼び出し回数に等しい
    pub max_depth: usize, // スタックの深さの最大値
}

/// フレームの値を受け取る継続
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    Return,     // 呼び出し元に返す
    Apply(u64), // 保留中の (k, _) の第二引数に渡す
}

/// 評価中のフレーム
#[derive(Debug)]
struct Frame {
    n: u64,
    m: BigUint,
}

/// アッカーマン関数の評価器。
///
/// 状態は制限値のみで、評価ごとのスタックは呼び出し内に閉じているため、
/// 複数のスレッドから同時に利用できる。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    limits: Limits,
}

impl Evaluator {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// ack(n, m) を評価する。
    ///
    /// # 利用例
    ///
    /// ```
    /// use ackerman::{Evaluator, Limits};
    /// use num::BigUint;
    ///
    /// let limits = Limits::new(1_000, 100_000).unwrap();
    /// let evaluator = Evaluator::new(limits);
    /// assert_eq!(evaluator.evaluate(2, 3), Ok(BigUint::from(9u32)));
    /// ```
    ///
    /// # 戻り値
    ///
    /// n か m が負の場合は EvalError::Domain を返し、
    /// スタックの深さかステップ数が上限を超えた場合は EvalError::ResourceExhausted を返す。
    pub fn evaluate<N, M>(&self, n: N, m: M) -> Result<BigUint, EvalError>
    where
        N: Into<BigInt>,
        M: Into<BigInt>,
    {
        self.run(n, m).map(|e| e.value)
    }

    /// evaluate と同様に評価し、ステップ数とスタックの深さの最大値も返す。
    pub fn run<N, M>(&self, n: N, m: M) -> Result<Evaluation, EvalError>
    where
        N: Into<BigInt>,
        M: Into<BigInt>,
    {
        let (n, m): (BigInt, BigInt) = (n.into(), m.into());
        if n.is_negative() || m.is_negative() {
            return Err(EvalError::Domain { n, m });
        }

        debug!("evaluate: ack({n}, {m}), {:?}", self.limits);

        let result = match (n.to_u64(), m.to_biguint()) {
            (Some(n), Some(m)) => self.eval(Frame { n, m }),
            // n が u64 に収まらない場合、少なくとも n + 1 ステップ必要なので上限を必ず超える
            _ => Err(EvalError::ResourceExhausted(Resource::Steps(
                self.limits.max_steps,
            ))),
        };

        match &result {
            Ok(e) => debug!(
                "ack({n}, {m}) = {}: steps = {}, max_depth = {}",
                e.value, e.steps, e.max_depth
            ),
            Err(err) => debug!("ack({n}, {m}): {err}"),
        }

        result
    }

    /// スタックを用いた評価の本体。
    ///
    /// 先頭のフレームを以下の3通りで解決する。
    ///
    /// ```text
    /// ack(0, m) = m + 1                  値を継続に渡す
    /// ack(n, 0) = ack(n - 1, 1)          フレームを置き換える
    /// ack(n, m) = ack(n - 1, ack(n, m - 1))  (n - 1, _) を継続として積む
    /// ```
    fn eval(&self, mut frame: Frame) -> Result<Evaluation, EvalError> {
        let mut stack = vec![Continuation::Return];
        let mut steps: u64 = 0;
        let mut max_depth = stack.len();

        loop {
            let max_steps = self.limits.max_steps;
            safe_add(&mut steps, &1, || {
                EvalError::ResourceExhausted(Resource::Steps(max_steps))
            })?;
            if steps > max_steps {
                return Err(EvalError::ResourceExhausted(Resource::Steps(max_steps)));
            }

            if frame.n == 0 {
                let value = mem::take(&mut frame.m) + 1u32;
                match stack.pop() {
                    Some(Continuation::Apply(k)) => frame = Frame { n: k, m: value },
                    Some(Continuation::Return) | None => {
                        return Ok(Evaluation {
                            value,
                            steps,
                            max_depth,
                        })
                    }
                }
            } else if frame.m.is_zero() {
                frame.n -= 1;
                frame.m = BigUint::one();
            } else {
                stack.push(Continuation::Apply(frame.n - 1));
                if stack.len() > self.limits.max_stack_depth {
                    return Err(EvalError::ResourceExhausted(Resource::StackDepth(
                        self.limits.max_stack_depth,
                    )));
                }
                max_depth = max_depth.max(stack.len());
                frame.m -= 1u32;
            }
        }
    }
}

/// 既定の制限値で ack(n, m) を評価する。
///
/// # 利用例
///
/// ```
/// use num::BigUint;
/// assert_eq!(ackerman::evaluate(3, 8), Ok(BigUint::from(2045u32)));
/// ```
pub fn evaluate<N, M>(n: N, m: M) -> Result<BigUint, EvalError>
where
    N: Into<BigInt>,
    M: Into<BigInt>,
{
    Evaluator::default().evaluate(n, m)
}

#[cfg(test)]
mod limits_test {
    use super::*;

    #[test]
    fn test() {
        let limits = Limits::default();
        assert_eq!(limits.max_stack_depth(), DEFAULT_MAX_STACK_DEPTH);
        assert_eq!(limits.max_steps(), DEFAULT_MAX_STEPS);

        let limits = Limits::new(3, 7).unwrap();
        assert_eq!(limits.max_stack_depth(), 3);
        assert_eq!(limits.max_steps(), 7);

        assert_eq!(Limits::new(0, 7), Err(LimitsError::ZeroStackDepth));
        assert_eq!(Limits::new(3, 0), Err(LimitsError::ZeroSteps));
    }
}

#[cfg(test)]
mod evaluate_test {
    use super::*;

    fn ack(n: i64, m: i64) -> BigUint {
        evaluate(n, m).unwrap()
    }

    #[test]
    fn test() {
        assert_eq!(ack(0, 0), BigUint::from(1u32));
        assert_eq!(ack(2, 2), BigUint::from(7u32));
        assert_eq!(ack(4, 0), BigUint::from(13u32));
        assert_eq!(ack(3, 8), BigUint::from(2045u32));
    }

    #[test]
    fn closed_form() {
        for m in 0..50u32 {
            let mi = i64::from(m);
            assert_eq!(ack(0, mi), BigUint::from(m + 1));
            assert_eq!(ack(1, mi), BigUint::from(m + 2));
            assert_eq!(ack(2, mi), BigUint::from(2 * m + 3));
        }

        // ack(3, m) = 2^(m + 3) - 3
        for m in 0..6u32 {
            assert_eq!(ack(3, i64::from(m)), BigUint::from(2u32.pow(m + 3) - 3));
        }
    }

    #[test]
    fn monotonic() {
        for n in 0..=3 {
            for m in 0..3 {
                assert!(ack(n, m) < ack(n, m + 1));
            }
        }
        for m in 0..=3 {
            for n in 0..3 {
                assert!(ack(n, m) < ack(n + 1, m));
            }
        }
    }

    #[test]
    fn big_argument() {
        // m が u64 に収まらなくても n = 0 なら 1 ステップで評価できる
        let m = BigInt::from(u64::MAX) * BigInt::from(4);
        let expected = (&m + BigInt::one()).to_biguint().unwrap();
        let e = Evaluator::default().run(0, m.clone()).unwrap();
        assert_eq!((e.value, e.steps, e.max_depth), (expected, 1, 1));

        // n = 1 では m ごとに継続を積むため、スタックの深さの上限に達する
        assert_eq!(
            evaluate(1, m),
            Err(EvalError::ResourceExhausted(Resource::StackDepth(
                DEFAULT_MAX_STACK_DEPTH
            )))
        );
    }

    #[test]
    fn deterministic() {
        let evaluator = Evaluator::default();
        let first = evaluator.run(3, 3).unwrap();
        for _ in 0..5 {
            assert_eq!(evaluator.run(3, 3).unwrap(), first);
        }
    }
}
