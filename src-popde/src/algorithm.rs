use crate::error::Result;
use crate::population::Population;

/// An optimisation algorithm that improves a population.
pub trait Algorithm {
    /// Improve `pop` in place. On error `pop` must be left as it was.
    fn evolve_in_place(&mut self, pop: &mut Population) -> Result<()>;

    /// Run the algorithm on `pop` and hand it back.
    fn evolve(&mut self, mut pop: Population) -> Result<Population> {
        self.evolve_in_place(&mut pop)?;
        Ok(pop)
    }

    fn name(&self) -> String;

    fn extra_info(&self) -> String {
        String::new()
    }
}
