//! Light Contexts

use super::*;
use crate::sampler::*;
use crate::scene::*;

/// All lights of a scene with a power proportional selection distribution.
#[derive(Clone, Default)]
pub struct LightContexts {
    /// The lights in scene graph order.
    contexts: Vec<LightContext>,

    /// Cumulative selection distribution; `cdf[k]` is the probability of
    /// selecting one of the first `k + 1` lights.
    cdf: Vec<Float>,
}

impl LightContexts {
    /// Create a new `LightContexts`. Selection probabilities are zero until
    /// `set_scene_bound()` is called.
    ///
    /// * `contexts` - The lights.
    pub fn new(contexts: Vec<LightContext>) -> Self {
        let cdf = vec![0.0; contexts.len()];
        Self { contexts, cdf }
    }

    /// Collect every light of a scene graph, depth first, along with the
    /// path of nodes leading to it.
    ///
    /// * `scene` - Root of the scene graph.
    pub fn gather(scene: &ArcSceneObject) -> Self {
        let mut contexts = vec![];
        let mut path = vec![];
        Self::collect(scene, &mut path, &mut contexts);
        debug!("Gathered {} lights", contexts.len());
        Self::new(contexts)
    }

    fn collect(
        node: &ArcSceneObject,
        path: &mut Vec<ArcSceneObject>,
        contexts: &mut Vec<LightContext>,
    ) {
        path.push(Arc::clone(node));
        if let Some(light) = node.light() {
            contexts.push(LightContext::new(light, path.clone()));
        }
        for child in node.children() {
            Self::collect(child, path, contexts);
        }
        path.pop();
    }

    /// Returns the number of lights.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Returns true if there are no lights.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Returns an iterator over the lights.
    pub fn iter(&self) -> std::slice::Iter<'_, LightContext> {
        self.contexts.iter()
    }

    /// Register the sub-sequences of every light.
    ///
    /// * `sampler` - The sampler.
    pub fn request_samples(&mut self, sampler: &mut dyn Sampler) {
        for ctx in self.contexts.iter_mut() {
            ctx.request_samples(sampler);
        }
    }

    /// Update every light's world transformation for a time.
    ///
    /// * `time` - The time.
    pub fn set_time(&mut self, time: Float) {
        for ctx in self.contexts.iter_mut() {
            ctx.set_time(time);
        }
    }

    /// Rebuild the selection distribution from the lights' total power.
    ///
    /// * `scene_bound` - Sphere enclosing the scene.
    pub fn set_scene_bound(&mut self, scene_bound: &BoundingSphere) {
        let mut total = 0.0;
        self.cdf = self
            .contexts
            .iter()
            .map(|ctx| {
                let power = ctx.total_power(scene_bound).average();
                if power.is_finite() && power > 0.0 {
                    total += power;
                }
                total
            })
            .collect();

        if total > 0.0 && total.is_finite() {
            for c in self.cdf.iter_mut() {
                *c /= total;
            }
            if let Some(last) = self.cdf.last_mut() {
                *last = 1.0;
            }
        } else {
            if !self.contexts.is_empty() {
                warn!("Lights emit no power, none will be sampled");
            }
            self.cdf.iter_mut().for_each(|c| *c = 0.0);
        }
    }

    /// Select a light with probability proportional to its power.
    ///
    /// * `x` - Uniform sample in [0, 1).
    pub fn sample(&self, x: Float) -> Option<(&LightContext, Float)> {
        if self.contexts.is_empty() {
            return None;
        }
        let last = self.contexts.len() - 1;
        let mut index = self.cdf.partition_point(|&c| c <= x).min(last);
        // Step over lights that cannot be selected.
        while index < last && self.pdf_at(index) <= 0.0 {
            index += 1;
        }
        let pdf = self.pdf_at(index);
        (pdf > 0.0).then(|| (&self.contexts[index], pdf))
    }

    /// Returns the probability of selecting a light.
    ///
    /// * `light` - A light returned by `iter()` or `sample()`.
    pub fn pdf(&self, light: &LightContext) -> Float {
        self.contexts
            .iter()
            .position(|ctx| std::ptr::eq(ctx, light))
            .map_or(0.0, |index| self.pdf_at(index))
    }

    fn pdf_at(&self, index: usize) -> Float {
        let below = if index > 0 { self.cdf[index - 1] } else { 0.0 };
        self.cdf[index] - below
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
