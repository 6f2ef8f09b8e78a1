//! Ordered overload selection.
//!
//! A directive (or constructor) with several argument shapes lists its arms
//! from most to least specific. The first arm whose [`Shape`] matches wins;
//! if that arm's builder then fails, the result is `None` and the caller
//! falls back to its default. Later arms are never tried.

use super::argument::{ArgumentNode, all_named};

/// Structural predicate over adapted arguments.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Always matches.
    Any,
    /// Exactly `n` arguments, none of them named.
    Arity(usize),
    /// At least `n` arguments, none of them named.
    AtLeast(usize),
    /// Every argument named, and at least one name is in the list.
    Named(&'static [&'static str]),
    /// Custom predicate over unnamed arguments, typically a type test on the
    /// first one.
    Where(fn(&[ArgumentNode]) -> bool),
}

impl Shape {
    /// Does this shape accept `args`?
    pub fn matches(&self, args: &[ArgumentNode]) -> bool {
        let unnamed = args.iter().all(|arg| arg.name().is_none());
        match self {
            Shape::Any => true,
            Shape::Arity(n) => unnamed && args.len() == *n,
            Shape::AtLeast(n) => unnamed && args.len() >= *n,
            Shape::Named(names) => {
                all_named(args)
                    && args
                        .iter()
                        .any(|arg| arg.name().is_some_and(|name| names.contains(&name)))
            }
            Shape::Where(predicate) => unnamed && predicate(args),
        }
    }
}

/// One overload arm.
pub struct Arm<T> {
    /// When this arm applies.
    pub shape: Shape,
    /// Builds the value; `None` on argument mismatch.
    pub build: fn(&[ArgumentNode]) -> Option<T>,
}

/// Evaluate `arms` top to bottom and build with the first structural match.
pub fn select<T>(args: &[ArgumentNode], arms: &[Arm<T>]) -> Option<T> {
    let arm = arms.iter().find(|arm| arm.shape.matches(args))?;
    (arm.build)(args)
}
