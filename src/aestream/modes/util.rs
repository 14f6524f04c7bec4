pub const PARALLEL_THRESHOLD: usize = 4 * 1024; // transform in parallel if input size gte 4 KiB
