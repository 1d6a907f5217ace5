#![feature(test)]
extern crate test;
use test::Bencher;

use ndarray::prelude::*;
use ndarray_subset::{sel, subset, subset_assign, Indexer};

fn target() -> Array2<f64> {
    Array::from_shape_fn((256, 256), |(i, j)| (i * 256 + j) as f64)
}

fn every_other_column() -> Indexer {
    sel![.., ..;2]
}

#[bench]
fn assign_strided(bench: &mut Bencher) {
    let x = target();
    let idx = every_other_column();
    let value = arr0(1.);
    bench.iter(|| subset_assign(&x, &idx, &value))
}

#[bench]
fn assign_explicit(bench: &mut Bencher) {
    let x = target();
    let idx = every_other_column().to_index_sets(x.shape()).unwrap();
    let value = arr0(1.);
    bench.iter(|| subset_assign(&x, &idx, &value))
}

#[bench]
fn assign_empty(bench: &mut Bencher) {
    let x = target();
    let idx = sel![[0usize; 0], ..];
    let value = arr0(1.);
    bench.iter(|| subset_assign(&x, &idx, &value))
}

#[bench]
fn read_strided(bench: &mut Bencher) {
    let x = target();
    let idx = every_other_column();
    bench.iter(|| subset(&x, &idx))
}

#[bench]
fn read_explicit(bench: &mut Bencher) {
    let x = target();
    let idx = every_other_column().to_index_sets(x.shape()).unwrap();
    bench.iter(|| subset(&x, &idx))
}
