//! Combinators that allow indicators to be chained together.

use crate::core::Indicator;

/// Chains two indicators together, feeding the output of the first into the second.
///
/// Rows where the first stage is undefined are not forwarded, so the second stage
/// only ever sees defined values and its warm-up starts at the first one.
#[derive(Debug, Clone)]
pub struct PipedIndicator<First, Second> {
    first: First,
    second: Second,
}

impl<First, Second> PipedIndicator<First, Second> {
    /// Creates a new piped indicator.
    pub fn new(first: First, second: Second) -> Self {
        Self { first, second }
    }

    /// The upstream stage.
    pub fn first(&self) -> &First {
        &self.first
    }
}

impl<First, Second> Indicator for PipedIndicator<First, Second>
where
    First: Indicator,
    Second: Indicator<Input = First::Output>,
{
    type Input = First::Input;
    type Output = Second::Output;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let intermediate = self.first.next(input)?;
        self.second.next(intermediate)
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }

    fn skip(&mut self) {
        self.first.skip();
        self.second.skip();
    }
}

/// Method-style chaining for any indicator.
pub trait IndicatorExt: Indicator + Sized {
    /// Feed this indicator's defined outputs into `next`.
    fn pipe<Next>(self, next: Next) -> PipedIndicator<Self, Next>
    where
        Next: Indicator<Input = Self::Output>,
    {
        PipedIndicator::new(self, next)
    }
}

impl<T: Indicator> IndicatorExt for T {}
