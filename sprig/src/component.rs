//! Constructor-style components and the optional lifecycle capability.

use crate::error::Error;
use crate::host::Host;
use crate::node::Node;
use crate::props::Props;

/// A constructor-style component template.
///
/// `produce` builds the component's subtree from the current props; the
/// default body fails, so a component that never overrides it surfaces
/// [`Error::ProduceNotOverridden`] the moment it renders. Plain render
/// functions don't go through this trait at all - see
/// [`Template::Render`](crate::Template::Render).
pub trait Component<H: Host> {
    /// Produce the subtree for one render. Invoked fresh on every mount and
    /// re-render; nothing is memoized.
    fn produce(&self, props: &Props<H>, comp: &Node<H>) -> Result<Node<H>, Error> {
        let _ = (props, comp);
        Err(Error::ProduceNotOverridden)
    }

    /// Lifecycle hooks, if this component observes them.
    fn hooks(&self) -> Option<&dyn Lifecycle> {
        None
    }
}

/// Lifecycle notifications for a mounted component.
///
/// Invoked at most once each per mount or re-render cycle: `will_render`
/// before expansion and mounting, `has_rendered` after the host node is
/// attached, `will_destroy` before a re-render discards the previously
/// mounted node. Actual host-node cleanup belongs to the replace operation,
/// not the hook.
pub trait Lifecycle {
    fn will_render(&self) {}
    fn has_rendered(&self) {}
    fn will_destroy(&self) {}
}
