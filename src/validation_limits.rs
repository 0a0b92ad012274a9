/// Bounds applied to attacker-supplied artifacts before any proportional
/// allocation or heavy computation happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifierLimits {
    /// Largest accepted byte length of any single artifact.
    pub max_artifact_bytes: usize,
    /// Largest circuit-size exponent.
    pub max_k: u32,
    /// Largest number of advice or fixed columns.
    pub max_columns: usize,
    /// Largest number of queries in any one query list.
    pub max_queries: usize,
    /// Largest number of gates.
    pub max_gates: usize,
    /// Total expression nodes across all gates.
    pub max_expression_nodes: usize,
    /// Nesting depth of a single gate expression.
    pub max_expression_depth: usize,
    /// Largest absolute rotation of a query.
    pub max_rotation: u32,
    /// Largest gate degree.
    pub max_degree: usize,
    /// Largest number of public inputs.
    pub max_public_inputs: usize,
}

impl Default for VerifierLimits {
    fn default() -> Self {
        Self::new()
    }
}

impl VerifierLimits {
    /// BN254 Fr has two-adicity 28; evaluation domains cannot grow past it.
    pub const MAX_SUPPORTED_K: u32 = 28;

    pub const fn new() -> Self {
        Self {
            max_artifact_bytes: 4 * 1024 * 1024,
            max_k: 26,
            max_columns: 64,
            max_queries: 256,
            max_gates: 256,
            max_expression_nodes: 4096,
            max_expression_depth: 32,
            max_rotation: 16,
            max_degree: 9,
            max_public_inputs: 4096,
        }
    }

    pub fn verify_artifact_size(&self, size: usize) -> bool {
        size <= self.max_artifact_bytes
    }

    pub fn verify_k(&self, k: u32) -> bool {
        k >= 1 && k <= self.max_k && k <= Self::MAX_SUPPORTED_K
    }

    pub fn verify_columns_count(&self, count: usize) -> bool {
        count <= self.max_columns
    }

    pub fn verify_queries_count(&self, count: usize) -> bool {
        count <= self.max_queries
    }

    pub fn verify_gates_count(&self, count: usize) -> bool {
        count >= 1 && count <= self.max_gates
    }

    pub fn verify_rotation(&self, rotation: i32) -> bool {
        rotation.unsigned_abs() <= self.max_rotation
    }

    pub fn verify_degree(&self, degree: usize) -> bool {
        degree <= self.max_degree
    }

    pub fn verify_public_inputs_count(&self, count: usize) -> bool {
        count <= self.max_public_inputs
    }
}
