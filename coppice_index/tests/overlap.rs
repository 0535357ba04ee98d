// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Randomized equivalence tests for `PositionIndex` overlap queries.
//!
//! The indexed query is checked against a brute-force scan applying the
//! closed-interval AABB predicate to every registered rectangle.

use coppice_index::geom;
use coppice_index::PositionIndex;
use kurbo::Rect;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, world: f64, max_size: f64, rng: &mut Rng) -> Vec<Rect> {
    (0..count)
        .map(|_| {
            let x0 = rng.next_f64() * world;
            let y0 = rng.next_f64() * world;
            let w = rng.next_f64() * max_size;
            let h = rng.next_f64() * max_size;
            Rect::new(x0, y0, x0 + w, y0 + h)
        })
        .collect()
}

#[test]
fn indexed_query_matches_brute_force() {
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    for _round in 0..20 {
        let rects = gen_random_rects(64, 400.0, 80.0, &mut rng);
        let mut index = PositionIndex::new();
        for (i, rect) in rects.iter().enumerate() {
            index.register(i, *rect);
        }
        let queries = gen_random_rects(32, 400.0, 120.0, &mut rng);
        for query in queries {
            let mut got = index.query_overlap(query);
            got.sort_unstable();
            let expected: Vec<usize> = rects
                .iter()
                .enumerate()
                .filter(|(_, r)| geom::overlaps(**r, query))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(got, expected, "query {query:?}");
        }
    }
}

#[test]
fn pairwise_overlap_is_symmetric_with_the_index() {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let rects = gen_random_rects(48, 300.0, 60.0, &mut rng);
    let mut index = PositionIndex::new();
    for (i, rect) in rects.iter().enumerate() {
        index.register(i, *rect);
    }
    for (i, rect) in rects.iter().enumerate() {
        let hits = index.query_overlap(*rect);
        // Every rect overlaps itself under the closed predicate.
        assert!(hits.contains(&i), "rect {i} should hit itself");
        for j in &hits {
            assert!(
                geom::overlaps(rects[*j], *rect),
                "index returned a non-overlapping pair ({i}, {j})"
            );
        }
    }
}

#[test]
fn excluded_key_never_wins() {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    let rects = gen_random_rects(32, 200.0, 50.0, &mut rng);
    let mut index = PositionIndex::new();
    for (i, rect) in rects.iter().enumerate() {
        index.register(i, *rect);
    }
    for (i, rect) in rects.iter().enumerate() {
        // Querying with a node's own rect while excluding it models the
        // dragged node filtering itself from collision candidates.
        assert_ne!(index.best_target(*rect, Some(&i)), Some(&i));
    }
}
