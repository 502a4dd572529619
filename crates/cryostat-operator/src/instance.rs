//! Read/write view over a `Cryostat` object.

use crate::crd::{Cryostat, CryostatSpec, CryostatStatus};

/// The fields of a [`Cryostat`] that deployment lifecycle code works with.
///
/// Identity fields are copied at construction. Spec, status and the
/// observed target namespaces are borrowed from the object, so writes made
/// through the instance land on the object the caller still owns.
#[derive(Debug)]
pub struct CryostatInstance<'a> {
    /// Name of the custom resource.
    pub name: String,
    /// Namespace the deployment is installed into.
    pub install_namespace: String,
    /// Namespaces the deployment should monitor.
    pub target_namespaces: Vec<String>,
    object: &'a mut Cryostat,
}

impl<'a> CryostatInstance<'a> {
    /// Build an instance over `cryostat`. Missing name or namespace become
    /// empty strings.
    #[must_use]
    pub fn from_cryostat(cryostat: &'a mut Cryostat) -> Self {
        Self {
            name: cryostat.metadata.name.clone().unwrap_or_default(),
            install_namespace: cryostat.metadata.namespace.clone().unwrap_or_default(),
            target_namespaces: cryostat.spec.target_namespaces.clone(),
            object: cryostat,
        }
    }

    /// Desired state.
    #[must_use]
    pub fn spec(&self) -> &CryostatSpec {
        &self.object.spec
    }

    /// Mutable desired state.
    pub fn spec_mut(&mut self) -> &mut CryostatSpec {
        &mut self.object.spec
    }

    /// Observed state, if the object has any.
    #[must_use]
    pub fn status(&self) -> Option<&CryostatStatus> {
        self.object.status.as_ref()
    }

    /// Mutable observed state, created empty on the object if absent.
    pub fn status_mut(&mut self) -> &mut CryostatStatus {
        self.object.status.get_or_insert_with(CryostatStatus::default)
    }

    /// Namespaces the deployment has been granted access to.
    #[must_use]
    pub fn target_namespace_status(&self) -> Option<&[String]> {
        self.status().map(|status| status.target_namespaces.as_slice())
    }

    /// Mutable list of granted namespaces.
    pub fn target_namespace_status_mut(&mut self) -> &mut Vec<String> {
        &mut self.status_mut().target_namespaces
    }

    /// The underlying object.
    #[must_use]
    pub fn object(&self) -> &Cryostat {
        &*self.object
    }

    /// The underlying object, mutably.
    pub fn object_mut(&mut self) -> &mut Cryostat {
        &mut *self.object
    }
}
