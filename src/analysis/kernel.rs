//! P-step diffusion kernel.
//!
//! `K = Σ_{k=0}^{p} α^k A^k`, where `A` is the (weighted) adjacency matrix, optionally
//! row-normalized so each row with outgoing edges sums to one. `K` is a dense `n x n` matrix:
//! three of them (`K`, the current term and `A`) are held at once, so memory grows as `24·n²` bytes.

use nalgebra::DMatrix;

use crate::{
    analysis::{mean, AnalyzerResult, KernelParams, LabeledMatrix, NetworkMean},
    graph::Graph,
};

/// Divides each row by its sum, leaving rows without edges untouched.
fn row_normalize(matrix: &mut DMatrix<f64>) {
    for mut row in matrix.row_iter_mut() {
        let sum = row.sum();
        if sum != 0.0 {
            row /= sum;
        }
    }
}

pub(crate) fn compute_pstep_kernel(graph: &Graph, params: &KernelParams) -> DMatrix<f64> {
    let n = graph.node_count();
    let mut adjacency = graph.adjacency_matrix();
    if params.normalize {
        row_normalize(&mut adjacency);
    }

    // The k = 0 term is the identity.
    let mut kernel = DMatrix::<f64>::identity(n, n);
    let mut term = DMatrix::<f64>::identity(n, n);

    for _ in 0..params.p {
        term = (&term * &adjacency) * params.alpha;
        kernel += &term;
    }

    kernel
}

pub(crate) fn pstep_kernel(graph: &Graph, params: &KernelParams) -> AnalyzerResult {
    let kernel = compute_pstep_kernel(graph, params);
    let row_sums: Vec<f64> = kernel.row_iter().map(|row| row.sum()).collect();

    AnalyzerResult {
        network_means: vec![NetworkMean::new("meanPstepKernelRowSum", mean(&row_sums))],
        node_properties: vec![("pstepKernelRowSum".to_owned(), row_sums)],
        matrix: Some(LabeledMatrix {
            name: format!("pstepKernel_p{}_alpha{}", params.p, params.alpha),
            labels: graph.node_ids().to_vec(),
            values: kernel,
        }),
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::dmatrix;

    use super::*;

    fn params(p: usize, alpha: f64, normalize: bool) -> KernelParams {
        KernelParams {
            p,
            alpha,
            normalize,
        }
    }

    #[test]
    fn zero_steps_is_identity() {
        let graph = graph!(["a", "b", "c"], ["c", "a"]);

        for alpha in [0.0, 0.5, 3.0] {
            assert_eq!(
                compute_pstep_kernel(&graph, &params(0, alpha, false)),
                DMatrix::<f64>::identity(3, 3)
            );
        }
    }

    #[test]
    fn two_steps() {
        let graph = graph!(["a", "b", "c"]);

        // I + 0.5 A + 0.25 A².
        assert_eq!(
            compute_pstep_kernel(&graph, &params(2, 0.5, false)),
            dmatrix![1.25, 0.5, 0.25;
                     0.5, 1.5, 0.5;
                     0.25, 0.5, 1.25]
        );
    }

    #[test]
    fn normalized() {
        let graph = graph!(["a", "b", "c"]);

        // Row-normalized A: [0 1 0; 0.5 0 0.5; 0 1 0].
        assert_eq!(
            compute_pstep_kernel(&graph, &params(1, 1.0, true)),
            dmatrix![1.0, 1.0, 0.0;
                     0.5, 1.0, 0.5;
                     0.0, 1.0, 1.0]
        );
    }

    #[test]
    fn directed_sink_row() {
        let graph = graph!(directed; ["a", "b"]);

        // b has no outgoing edge, its row stays as is when normalizing.
        assert_eq!(
            compute_pstep_kernel(&graph, &params(3, 1.0, true)),
            dmatrix![1.0, 1.0;
                     0.0, 1.0]
        );
    }

    #[test]
    fn result() {
        let graph = graph!(["a", "b"]);
        let result = pstep_kernel(&graph, &params(1, 1.0, false));

        assert_eq!(result.node_properties[0].1, vec![2.0, 2.0]);
        assert_eq!(result.network_means[0].value, 2.0);

        let matrix = result.matrix.unwrap();
        assert_eq!(matrix.name, "pstepKernel_p1_alpha1");
        assert_eq!(matrix.labels, vec!["a", "b"]);
    }
}
