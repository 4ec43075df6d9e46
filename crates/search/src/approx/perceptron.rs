use super::*;
use crate::Body;
use crate::Hyper;
use incognito_core::Entropy;
use incognito_core::INIT_SCALE;
use incognito_core::Utility;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;
use ndarray::Axis;
use rand::Rng;
use rand::rngs::SmallRng;

/// Weights and biases of both dense layers.
///
/// The same shape holds parameters, gradients and momentum velocity.
#[derive(Debug, Clone, PartialEq)]
struct Layers {
    /// `hidden × inputs`
    w1: Array2<f32>,
    b1: Array1<f32>,
    /// `outputs × hidden`
    w2: Array2<f32>,
    b2: Array1<f32>,
}

impl Layers {
    fn zeros(inputs: usize, hidden: usize, outputs: usize) -> Self {
        Self {
            w1: Array2::zeros((hidden, inputs)),
            b1: Array1::zeros(hidden),
            w2: Array2::zeros((outputs, hidden)),
            b2: Array1::zeros(outputs),
        }
    }
    fn zeros_like(&self) -> Self {
        Self::zeros(self.w1.ncols(), self.w1.nrows(), self.w2.nrows())
    }
    /// `self += alpha · other`
    fn scaled_add(&mut self, alpha: f32, other: &Self) {
        self.w1.scaled_add(alpha, &other.w1);
        self.b1.scaled_add(alpha, &other.b1);
        self.w2.scaled_add(alpha, &other.w2);
        self.b2.scaled_add(alpha, &other.b2);
    }
    fn scale(&mut self, alpha: f32) {
        self.w1 *= alpha;
        self.b1 *= alpha;
        self.w2 *= alpha;
        self.b2 *= alpha;
    }
}

/// `a ⊗ b` as an `a.len() × b.len()` matrix.
fn outer(a: ArrayView1<f32>, b: ArrayView1<f32>) -> Array2<f32> {
    a.insert_axis(Axis(1)).dot(&b.insert_axis(Axis(0)))
}

/// One-hidden-layer network from features to action values.
///
/// ```text
/// h = tanh(W₁·x + b₁)        q = W₂·h + b₂
/// ```
///
/// Updated by momentum SGD on the combined loss
/// `regression + message_weight · likelihood`. The output layer starts
/// at zero, so an untrained network predicts zero for every action.
#[derive(Debug, Clone)]
pub struct Perceptron {
    params: Layers,
    velocity: Layers,
    hyper: Hyper,
    regressions: Replay<Regression>,
    witnesses: Replay<Witness>,
    rounds: usize,
}

impl Perceptron {
    pub fn new(inputs: usize, outputs: usize, hyper: Hyper, rng: &mut SmallRng) -> Self {
        assert!(inputs > 0 && outputs > 0 && hyper.hidden > 0, "degenerate network shape");
        let scale = INIT_SCALE / (inputs as f32).sqrt();
        let mut params = Layers::zeros(inputs, hyper.hidden, outputs);
        params.w1 = Array2::from_shape_fn((hyper.hidden, inputs), |_| rng.random_range(-scale..scale));
        Self {
            velocity: params.zeros_like(),
            params,
            regressions: Replay::new(hyper.capacity),
            witnesses: Replay::new(hyper.capacity),
            hyper,
            rounds: 0,
        }
    }
    /// Sized to a body's feature and action counts.
    pub fn of<B>(hyper: Hyper, rng: &mut SmallRng) -> Self
    where
        B: Body,
    {
        Self::new(B::FEATURES, B::ACTIONS, hyper, rng)
    }
    /// Training rounds completed so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
    pub fn buffered(&self) -> (usize, usize) {
        (self.regressions.len(), self.witnesses.len())
    }

    /// Hidden activations and output values.
    fn forward(&self, x: ArrayView1<f32>) -> (Array1<f32>, Array1<f32>) {
        debug_assert!(x.len() == self.params.w1.ncols(), "feature length mismatch");
        let h = (self.params.w1.dot(&x) + &self.params.b1).mapv(f32::tanh);
        let q = self.params.w2.dot(&h) + &self.params.b2;
        (h, q)
    }

    /// Accumulates parameter gradients given `dq = ∂loss/∂q`.
    fn backward(&self, x: ArrayView1<f32>, h: &Array1<f32>, dq: &Array1<f32>, grad: &mut Layers) {
        grad.b2 += dq;
        grad.w2 += &outer(dq.view(), h.view());
        let dz = self.params.w2.t().dot(dq) * &h.mapv(|h| 1. - h * h);
        grad.b1 += &dz;
        grad.w1 += &outer(dz.view(), x);
    }

    /// Mean count-weighted squared error over buffered entries.
    fn regression(&self, grad: &mut Layers) -> Utility {
        let n = self.regressions.len();
        if n == 0 {
            return 0.;
        }
        let variance = self.hyper.variance;
        let mut loss = 0.;
        let mut local = self.params.zeros_like();
        for sample in self.regressions.iter() {
            let x = ArrayView1::from(&sample.features[..]);
            let (h, q) = self.forward(x);
            let counts = Array1::from_iter(sample.counts.iter().map(|n| *n as f32));
            let error = &q - &ArrayView1::from(&sample.means[..]);
            loss += (&counts * &error * &error).sum() / (2. * variance);
            let dq = &counts * &error / variance;
            self.backward(x, &h, &dq, &mut local);
        }
        grad.scaled_add(1. / n as f32, &local);
        loss / n as f32
    }

    /// Mean negative log mixture likelihood over buffered witnesses.
    ///
    /// Each candidate's softmax gradient is scaled by its posterior
    /// responsibility `w·P(match) / Σ w·P(match)`.
    fn likelihood(&self, grad: &mut Layers, weight: f32) -> Entropy {
        let temperature = self.hyper.temperature;
        let mut loss = 0.;
        let mut count = 0;
        let mut local = self.params.zeros_like();
        for witness in self.witnesses.iter() {
            let mass = witness.candidates.iter().map(|c| c.weight).sum::<f32>();
            let passes = witness
                .candidates
                .iter()
                .map(|c| {
                    let (h, q) = self.forward(ArrayView1::from(&c.features[..]));
                    let policy = softmax(&q.to_vec(), &c.legal, temperature);
                    (h, policy)
                })
                .collect::<Vec<_>>();
            let mixture = witness
                .candidates
                .iter()
                .zip(&passes)
                .map(|(c, (_, policy))| c.weight / mass * policy[c.action])
                .sum::<f32>();
            if !(mixture > 0.) {
                continue;
            }
            loss -= mixture.ln();
            count += 1;
            for (c, (h, policy)) in witness.candidates.iter().zip(&passes) {
                let responsibility = c.weight / mass * policy[c.action] / mixture;
                let dq = Array1::from_iter(policy.iter().enumerate().map(|(b, pi)| {
                    let hit = if b == c.action { 1. } else { 0. };
                    -responsibility * (hit - pi) / temperature
                }));
                self.backward(ArrayView1::from(&c.features[..]), h, &dq, &mut local);
            }
        }
        if count == 0 {
            return 0.;
        }
        grad.scaled_add(weight / count as f32, &local);
        loss / count as f32
    }

    /// `v ← μ·v − η·g`, then `θ ← θ + v`.
    fn step(&mut self, grad: &Layers) {
        self.velocity.scale(self.hyper.momentum);
        self.velocity.scaled_add(-self.hyper.learning_rate, grad);
        self.params.scaled_add(1., &self.velocity);
    }
}

impl Approximator for Perceptron {
    fn predict(&self, features: &[f32]) -> Vec<Utility> {
        self.forward(ArrayView1::from(features)).1.to_vec()
    }
    fn regress(&mut self, sample: Regression) {
        self.regressions.push(sample);
    }
    fn witness(&mut self, sample: Witness) {
        self.witnesses.push(sample);
    }
    fn train(&mut self) -> Option<Loss> {
        if self.regressions.fresh() + self.witnesses.fresh() < self.hyper.threshold {
            return None;
        }
        let mut loss = Loss::default();
        for _ in 0..self.hyper.steps {
            let mut grad = self.params.zeros_like();
            loss.regression = self.regression(&mut grad);
            loss.likelihood = self.likelihood(&mut grad, self.hyper.message_weight);
            self.step(&grad);
        }
        self.regressions.settle();
        self.witnesses.settle();
        self.rounds += 1;
        Some(loss)
    }
}
