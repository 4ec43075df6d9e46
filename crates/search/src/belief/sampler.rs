use rand::rngs::SmallRng;

/// Draws one hidden state per call.
///
/// Priors over initial hidden states and node beliefs are both samplers.
/// Implementations must be reentrant: a prior may be shared across
/// agents that run on different threads.
pub trait Sampler<B> {
    fn sample(&self, rng: &mut SmallRng) -> B;
}

/// Blanket impl so plain functions and closures can serve as priors.
impl<B, F> Sampler<B> for F
where
    F: Fn(&mut SmallRng) -> B,
{
    fn sample(&self, rng: &mut SmallRng) -> B {
        self(rng)
    }
}
