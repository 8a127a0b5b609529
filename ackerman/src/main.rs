use ackerman::{
    helper::DynError, Evaluator, Limits, DEFAULT_MAX_STACK_DEPTH, DEFAULT_MAX_STEPS,
};
use num::BigInt;
use std::env;

/// 省略可能な制限値の引数を読む。省略時は default を返す。
fn parse_limit<T>(arg: Option<&String>, default: T, name: &str) -> Result<T, DynError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match arg {
        Some(s) => s
            .parse::<T>()
            .map_err(|e| format!("{name} が不正です: {s}: {e}").into()),
        None => Ok(default),
    }
}

fn main() -> Result<(), DynError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <n> <m> [max_steps] [max_stack_depth]", args[0]);
        return Err("invalid arguments".into());
    }

    // 負の値も BigInt として読み込み、評価器に DomainError を返させる
    let n: BigInt = args[1].parse()?;
    let m: BigInt = args[2].parse()?;
    let max_steps = parse_limit(args.get(3), DEFAULT_MAX_STEPS, "max_steps")?;
    let max_stack_depth = parse_limit(args.get(4), DEFAULT_MAX_STACK_DEPTH, "max_stack_depth")?;

    let evaluator = Evaluator::new(Limits::new(max_stack_depth, max_steps)?);
    match evaluator.run(n.clone(), m.clone()) {
        Ok(e) => {
            println!("ackermann({n}, {m}) = {}", e.value);
            println!("steps: {}, max depth: {}", e.steps, e.max_depth);
        }
        Err(e) => {
            eprintln!("ackerman: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}
