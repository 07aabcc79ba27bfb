use std::ops::Range;

use rand::Rng;
use rand_distr::Geometric;

use crate::graph::*;

pub trait RandomGraphGenerator: Sized {
    /// Generates a Gilbert (also, wrongly, known as Erdos-Reyni) graph with
    /// uniform random weights and traversal costs drawn from `weights`. Each
    /// of the `n(n-1)/2` possible edges exists independently with probability
    /// `p`; each existing edge receives an independently drawn parallel twin
    /// with probability `parallel_p`.
    fn random_weighted_multigraph<R: Rng>(
        rng: &mut R,
        n: Node,
        p: f64,
        parallel_p: f64,
        weights: Range<Weight>,
    ) -> Self;

    fn random_weighted_gnp<R: Rng>(rng: &mut R, n: Node, p: f64, weights: Range<Weight>) -> Self {
        Self::random_weighted_multigraph(rng, n, p, 0.0, weights)
    }
}

impl<G> RandomGraphGenerator for G
where
    G: GraphNew + GraphEdgeAppend,
{
    fn random_weighted_multigraph<R: Rng>(
        rng: &mut R,
        n: Node,
        p: f64,
        parallel_p: f64,
        weights: Range<Weight>,
    ) -> Self {
        let mut result = Self::new(n);

        // indirection via vector as we need a &mut for rng and the weight
        // draws also need rng
        let pairs: Vec<_> = BernoulliSamplingRange::new(rng, 0, (n as i64) * (n as i64), p)
            .filter_map(|x| {
                let u = x / (n as i64);
                let v = x % (n as i64);
                (u < v).then_some((u as Node, v as Node))
            })
            .collect();

        for (u, v) in pairs {
            let mut instances = 1 + usize::from(parallel_p > 0.0 && rng.gen_bool(parallel_p));
            while instances > 0 {
                result.add_edge(WeightedEdge::with_costs(
                    u,
                    v,
                    rng.gen_range(weights.clone()),
                    rng.gen_range(weights.clone()),
                    rng.gen_range(weights.clone()),
                ));
                instances -= 1;
            }
        }

        result
    }
}

/// Provides an iterator similarly to Range, but
/// includes each element i.i.d. with probability of p
pub struct BernoulliSamplingRange<'a, R: Rng> {
    current: i64,
    end: i64,
    distr: Geometric,
    rng: &'a mut R,
}

impl<'a, R: Rng> BernoulliSamplingRange<'a, R> {
    pub fn new(rng: &'a mut R, begin: i64, end: i64, prob: f64) -> Self {
        debug_assert!(begin <= end);
        debug_assert!((0.0..=1.0).contains(&prob));
        Self {
            rng,
            current: begin - 1,
            end,
            distr: Geometric::new(prob).unwrap(),
        }
    }

    fn try_advance(&mut self) {
        if self.current >= self.end {
            return;
        }

        let skip = self.rng.sample(self.distr);
        if skip > i64::MAX as u64 {
            self.current = self.end;
        } else {
            self.current += 1;
            self.current = match self.current.checked_add(skip as i64) {
                Some(x) => x,
                None => self.end,
            }
        }
    }
}

impl<R: Rng> Iterator for BernoulliSamplingRange<'_, R> {
    type Item = i64;
    fn next(&mut self) -> Option<Self::Item> {
        self.try_advance();

        if self.current >= self.end {
            None
        } else {
            Some(self.current)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bernoulli_range() {
        let rng = &mut rand::thread_rng();

        // empty range
        assert_eq!(BernoulliSamplingRange::new(rng, 0, 0, 1.0).count(), 0);

        // p=1
        assert_eq!(BernoulliSamplingRange::new(rng, 0, 10, 1.0).count(), 10);

        // p=0
        assert_eq!(BernoulliSamplingRange::new(rng, 0, 100, 0.0).count(), 0);

        // test that we see each element ~p*n times
        let min = 3;
        let max = 100;
        let mut counts = vec![0; max as usize];
        for _ in 0..1000 {
            let b = BernoulliSamplingRange::new(rng, min, max, 0.25);
            for x in b {
                assert!(min <= x);
                assert!(x < max);
                counts[x as usize] += 1;
            }
        }

        assert!(counts.iter().enumerate().all(|(i, &c)| {
            if i < min as usize {
                c == 0
            } else {
                (150..350).contains(&c)
            }
        }));
    }

    #[test]
    fn test_gnp_expected_edges() {
        let rng = &mut rand::thread_rng();

        // generate multiple graphs of various densities and verify that the
        // number of edges is close to the expected value
        for p in [0.01, 0.1] {
            let repeats = 100;
            let n = 100;

            let mean_edges = (0..repeats)
                .map(|_| {
                    Multigraph::random_weighted_gnp(rng, n, p, 1..10).number_of_edges() as f64
                })
                .sum::<f64>()
                / repeats as f64;

            let expected = p * (n as f64) * ((n - 1) as f64) / 2.0;

            assert!((0.75 * expected..1.25 * expected).contains(&mean_edges));
        }
    }

    #[test]
    fn test_multigraph_properties() {
        let rng = &mut rand::thread_rng();

        let graph = Multigraph::random_weighted_multigraph(rng, 40, 0.3, 1.0, 5..8);

        // parallel_p = 1 duplicates every sampled pair
        assert!(graph.number_of_edges() > 0);
        assert_eq!(graph.number_of_edges() % 2, 0);

        for chunk in graph.edges().chunks(2) {
            assert_eq!((chunk[0].u, chunk[0].v), (chunk[1].u, chunk[1].v));
        }

        for e in graph.edges() {
            assert!(!e.is_loop());
            assert!(e.u < e.v);
            assert!((5..8).contains(&e.weight));
            assert!((5..8).contains(&e.cost_forward));
            assert!((5..8).contains(&e.cost_backward));
        }
    }
}
