mod common;

use approx::assert_relative_eq;
use common::*;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tufted::{
    PolygonSoup, SparseMatrix, TuftedError, TuftedLaplacian, build_tufted_laplacian, save_spmat, write_spmat,
};

fn laplacian(soup: &PolygonSoup) -> TuftedLaplacian {
    build_tufted_laplacian(soup, 1e-6).expect("laplacian")
}

fn assert_symmetric(m: &SparseMatrix) {
    for (r, c, v) in m.iter() {
        assert_relative_eq!(m.get(c, r), v, epsilon = 1e-12);
    }
}

fn assert_rows_sum_to_zero(m: &SparseMatrix) {
    for (r, s) in m.row_sums().into_iter().enumerate() {
        assert!(s.abs() < 1e-10, "row {r} sums to {s}");
    }
}

fn quadratic_form(m: &SparseMatrix, x: &[f64]) -> f64 {
    m.iter().map(|(r, c, v)| x[r] * v * x[c]).sum()
}

#[test]
fn test_tetrahedron_operator() {
    let soup = tetrahedron();
    let TuftedLaplacian { laplacian, mass } = laplacian(&soup);
    assert_eq!(laplacian.rows, 4);
    assert_eq!(laplacian.cols, 4);
    assert_symmetric(&laplacian);
    assert_rows_sum_to_zero(&laplacian);
    for v in 0..4 {
        assert!(laplacian.get(v, v) > 0.0);
    }
    assert_eq!(mass.nnz(), 4);
    let total: f64 = mass.iter().map(|(_, _, v)| v).sum();
    assert_relative_eq!(total, total_area(&soup), epsilon = 1e-9);
}

#[test]
fn test_open_and_nonmanifold_meshes_keep_area() {
    for soup in [single_triangle(), unit_square(), fin(), bowtie(), thin_rhombus()] {
        let TuftedLaplacian { laplacian, mass } = laplacian(&soup);
        assert_symmetric(&laplacian);
        assert_rows_sum_to_zero(&laplacian);
        let total: f64 = mass.iter().map(|(_, _, v)| v).sum();
        // two sheets, each weighted by one half
        assert_relative_eq!(total, total_area(&soup), max_relative = 1e-5);
    }
}

#[test]
fn test_square_weights_match_cotan_formula() {
    let TuftedLaplacian { laplacian, .. } = build_tufted_laplacian(&unit_square(), 0.0).expect("laplacian");
    // each boundary edge sees 45° on both copies: (cot + cot) / 2 over two sheets
    assert_relative_eq!(laplacian.get(0, 1), -0.5, epsilon = 1e-12);
    assert_relative_eq!(laplacian.get(0, 3), -0.5, epsilon = 1e-12);
    // the diagonal sees two right angles on each sheet
    assert_relative_eq!(laplacian.get(0, 2), 0.0, epsilon = 1e-12);
    assert_eq!(laplacian.get(1, 3), 0.0);
    assert_relative_eq!(laplacian.get(0, 0), 1.0, epsilon = 1e-12);
}

#[test]
fn test_operator_is_positive_semidefinite() {
    let mut rng = StdRng::seed_from_u64(7);
    let soup = flat_grid(4, 0.3, 11);
    let TuftedLaplacian { laplacian, .. } = laplacian(&soup);
    for _ in 0..20 {
        let x: Vec<f64> = (0..laplacian.rows).map(|_| rng.random_range(-1.0..1.0)).collect();
        assert!(quadratic_form(&laplacian, &x) >= -1e-10);
    }
    let ones = vec![1.0; laplacian.rows];
    assert!(quadratic_form(&laplacian, &ones).abs() < 1e-10);
}

#[test]
fn test_sliver_yields_finite_operator() {
    let TuftedLaplacian { laplacian, mass } = build_tufted_laplacian(&sliver(), 1e-3).expect("laplacian");
    assert!(laplacian.iter().all(|(_, _, v)| v.is_finite()));
    assert!(mass.iter().all(|(_, _, v)| v.is_finite() && v >= 0.0));
}

#[test]
fn test_sliver_without_mollification_is_degenerate() {
    let err = build_tufted_laplacian(&sliver(), 0.0).unwrap_err();
    assert!(matches!(err, TuftedError::DegenerateTriangle { .. }));
}

#[test]
fn test_spmat_lines_are_one_based() {
    let m = SparseMatrix::from_triplets(2, 2, [(0, 0, 2.0), (1, 0, -1.0), (0, 1, -1.0), (1, 1, 2.0), (1, 1, 0.5)])
        .expect("matrix");
    assert_eq!(m.nnz(), 4);
    assert_eq!(m.get(1, 1), 2.5);

    let mut out = Vec::new();
    write_spmat(&m, &mut out).expect("write");
    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["1 1 2.0", "2 1 -1.0", "1 2 -1.0", "2 2 2.5"]);
}

#[test]
fn test_spmat_rejects_out_of_range_triplets() {
    let err = SparseMatrix::from_triplets(2, 2, [(2, 0, 1.0)]).unwrap_err();
    assert!(matches!(err, TuftedError::InvalidParameter { .. }));
}

#[test]
fn test_save_spmat_reports_the_failing_path() {
    let m = SparseMatrix::from_diagonal(&[1.0, 2.0]);
    let path = std::env::temp_dir().join("tufted-missing-dir").join("nested").join("mass.spmat");
    let err = save_spmat(&m, &path).unwrap_err();
    match err {
        TuftedError::OutputWrite { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_save_spmat_round_trips_text() {
    let m = SparseMatrix::from_diagonal(&[0.25, 4.0]);
    let path = std::env::temp_dir().join(format!("tufted-mass-{}.spmat", std::process::id()));
    save_spmat(&m, &path).expect("save");
    let text = std::fs::read_to_string(&path).expect("read back");
    std::fs::remove_file(&path).ok();
    assert_eq!(text, "1 1 0.25\n2 2 4.0\n");
}
