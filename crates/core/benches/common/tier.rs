use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTier {
    Quick,
    Full,
}

pub fn bench_tier() -> BenchTier {
    match env::var("PDFCAPTURE_BENCH_TIER").as_deref() {
        Ok("full") => BenchTier::Full,
        _ => BenchTier::Quick,
    }
}

impl BenchTier {
    /// Pages in the synthetic documents.
    pub fn page_count(self) -> u32 {
        match self {
            BenchTier::Quick => 50,
            BenchTier::Full => 500,
        }
    }
}
