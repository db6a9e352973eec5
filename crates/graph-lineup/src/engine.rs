use crate::provider::GraphProvider;

/// An engine that can arrange the nodes of a host graph
///
/// The trait is generic over the provider type `P`, so different engines
/// can put different requirements on their hosts:
/// - Column lineups implement `ArrangeEngine<P>` for any `P: GraphProvider`
/// - A force-directed engine could require position read-back instead
pub trait ArrangeEngine<P: GraphProvider> {
    /// Error produced when the arrangement cannot run
    type Error;

    /// Assign a position to every node reachable from the graph outputs
    ///
    /// # Errors
    /// Returns an error when a precondition fails before the pipeline
    /// starts (engine-specific; the pipeline itself does not fail mid-run)
    fn arrange(&self, provider: &mut P) -> Result<(), Self::Error>;
}
