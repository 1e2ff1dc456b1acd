//! Tests for saving and loading grid objects as text.

use approx::assert_relative_eq;
use gftools::grid::{Coord, KMesh, MatsubaraGrid};
use gftools::{GridError, GridObject, GridTuple, TextFormat, c64};

#[test]
fn test_matsubara_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gw.dat");
    let grids = GridTuple::new(vec![MatsubaraGrid::fermionic(10.0, 2).unwrap().into()]);

    let mut g: GridObject<c64> = GridObject::new(grids.clone());
    g.set_index(&[0], c64::new(4.0, 0.0)).unwrap();
    g.set_index(&[1], c64::new(3.1, 0.0)).unwrap();
    g.savetxt(&path).unwrap();

    let mut h: GridObject<c64> = GridObject::new(grids);
    h.loadtxt_with(&path, &TextFormat::default()).unwrap();
    assert!(h.diff(&g).unwrap() < 1e-5);
    assert_eq!(h.get_index(&[1]).unwrap(), c64::new(3.1, 0.0));
}

#[test]
fn test_low_precision_round_trip_within_tolerance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ek.dat");
    let grids = GridTuple::new(vec![
        KMesh::new(4).unwrap().into(),
        KMesh::new(4).unwrap().into(),
    ]);
    let mut e: GridObject<f64> = GridObject::new(grids.clone());
    e.fill(|a: &[Coord]| -2.0 * (a[0].to_real().cos() + a[1].to_real().cos()));
    let format = TextFormat::default().with_precision(9);
    e.savetxt_with(&path, &format).unwrap();

    let mut loaded: GridObject<f64> = GridObject::new(grids);
    loaded.loadtxt(&path, 1e-6).unwrap();
    for (x, y) in loaded.data().data().iter().zip(e.data().data()) {
        assert_relative_eq!(x, y, epsilon = 1e-8);
    }
}

#[test]
fn test_load_mismatched_grid_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gw.dat");
    let mut g: GridObject<c64> =
        GridObject::new(GridTuple::new(vec![MatsubaraGrid::fermionic(10.0, 4).unwrap().into()]));
    g.fill(|a: &[Coord]| 1.0 / a[0].to_complex());
    g.savetxt(&path).unwrap();

    let mut other_beta: GridObject<c64> =
        GridObject::new(GridTuple::new(vec![MatsubaraGrid::fermionic(20.0, 4).unwrap().into()]));
    let err = other_beta.loadtxt(&path, 1e-8).unwrap_err();
    assert!(matches!(err, GridError::Io { .. }));
}

#[test]
fn test_load_parses_parenthesized_complex() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gw.dat");
    let grids = GridTuple::new(vec![MatsubaraGrid::fermionic(1.0, 1).unwrap().into()]);
    let w = std::f64::consts::PI;
    std::fs::write(&path, format!("(0,{w:.17e}) (1.5,-2)\n")).unwrap();

    let mut g: GridObject<c64> = GridObject::new(grids);
    g.loadtxt(&path, 1e-8).unwrap();
    assert_eq!(g.get_index(&[0]).unwrap(), c64::new(1.5, -2.0));
}
