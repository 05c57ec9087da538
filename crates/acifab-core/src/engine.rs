//! # Validation Engine & Flattening Projector
//!
//! One depth-first pass over the tenant tree. At each node, in order:
//! mandatory fields, vocabulary membership, reference resolution,
//! registration of the node's own name, then record emission — and only
//! then descent into children. A node's record is never emitted before its
//! own checks pass, and the first violation anywhere aborts the run.
//!
//! ## Processing order
//!
//! Within a tenant: vrfs → contracts (subjects, filters) → bridge domains
//! (subnets) → application profiles (endpoint groups, contract bindings).
//! This order is load-bearing, not incidental: vrf and contract names must
//! be registered before bridge domains and endpoint groups look them up.
//! Combined with the single ordered pass, it gives declaration-before-use
//! semantics — a reference to a name that only appears later in the
//! document is rejected even if the document would be consistent reordered.

use serde_yaml::Value;
use tracing::debug;

use crate::error::{Breadcrumb, FlattenError};
use crate::model::{
    ApplicationProfileRecord, BridgeDomainRecord, BridgeDomainSubnetRecord, ContractRecord,
    ContractSubjectRecord, EndpointGroupContractRecord, EndpointGroupRecord, FilterRecord,
    FlatModel, SubjectFilterRecord, TenantRecord, VrfRecord,
};
use crate::node;
use crate::scope::{ScopeId, ScopeLedger};
use crate::vocab::{ContractRole, ContractScope, SubnetVisibility};

/// Validate a parsed tenant tree and project it into the flat model.
///
/// All-or-nothing: either every entity in the document passed every check
/// and the full projection is returned, or the first violation found in
/// traversal order is returned and no partial output exists.
///
/// # Errors
///
/// Any [`FlattenError`] raised by the checks described in the module
/// documentation.
pub fn validate_and_flatten(doc: &Value) -> Result<FlatModel, FlattenError> {
    Flattener::default().run(doc)
}

/// Traversal state: the reference ledger and the in-progress projection.
/// Created per invocation and consumed by it; the engine holds no global
/// state.
#[derive(Debug, Default)]
struct Flattener {
    ledger: ScopeLedger,
    model: FlatModel,
}

impl Flattener {
    fn run(mut self, doc: &Value) -> Result<FlatModel, FlattenError> {
        let root = Breadcrumb::root();
        let tenants = node::require_entries(doc, "tenants", "config", &root)?;
        for tenant in tenants {
            self.tenant(tenant)?;
        }
        debug!(
            tenants = self.model.tenants.len(),
            records = self.model.record_count(),
            "tenant tree flattened"
        );
        Ok(self.model)
    }

    fn tenant(&mut self, tenant: &Value) -> Result<(), FlattenError> {
        let root = Breadcrumb::root();
        let name = node::require_string(tenant, "name", "tenant", &root)?;
        let at = root.child(&name);
        let description = node::require_string(tenant, "description", "tenant", &at)?;
        let profiles = node::require_entries(tenant, "application_profiles", "tenant", &at)?;
        let bridge_domains = node::require_entries(tenant, "bridge_domains", "tenant", &at)?;
        let vrfs = node::require_entries(tenant, "vrfs", "tenant", &at)?;
        let contracts = node::require_entries(tenant, "contracts", "tenant", &at)?;

        self.ledger
            .register(&ScopeId::global("tenants"), &name, &root)?;
        self.model.tenants.push(TenantRecord {
            tenant: name.clone(),
            description,
        });

        for vrf in vrfs {
            self.vrf(vrf, &name, &at)?;
        }
        for contract in contracts {
            self.contract(contract, &name, &at)?;
        }
        for bridge_domain in bridge_domains {
            self.bridge_domain(bridge_domain, &name, &at)?;
        }
        for profile in profiles {
            self.application_profile(profile, &name, &at)?;
        }
        debug!(tenant = %name, "tenant validated");
        Ok(())
    }

    fn vrf(&mut self, vrf: &Value, tenant: &str, at: &Breadcrumb) -> Result<(), FlattenError> {
        let name = node::require_string(vrf, "name", "vrf", at)?;
        self.ledger
            .register(&ScopeId::under("vrfs", tenant), &name, at)?;
        self.model.vrfs.push(VrfRecord {
            tenant: tenant.to_string(),
            vrf: name,
        });
        Ok(())
    }

    fn contract(
        &mut self,
        contract: &Value,
        tenant: &str,
        at: &Breadcrumb,
    ) -> Result<(), FlattenError> {
        let name = node::require_string(contract, "name", "contract", at)?;
        let at_contract = at.child(&name);
        let scope_raw = node::require_string(contract, "scope", "contract", &at_contract)?;
        let scope = ContractScope::parse(&scope_raw).ok_or_else(|| {
            FlattenError::InvalidEnumValue {
                field: "scope",
                value: scope_raw.clone(),
                allowed: ContractScope::names(),
                at: at_contract.clone(),
            }
        })?;
        let subjects = node::require_entries(contract, "subject", "contract", &at_contract)?;

        self.ledger
            .register(&ScopeId::under("contracts", tenant), &name, at)?;
        self.model.contracts.push(ContractRecord {
            tenant: tenant.to_string(),
            contract: name.clone(),
            scope,
        });

        for subject in subjects {
            self.subject(subject, tenant, &name, &at_contract)?;
        }
        Ok(())
    }

    fn subject(
        &mut self,
        subject: &Value,
        tenant: &str,
        contract: &str,
        at: &Breadcrumb,
    ) -> Result<(), FlattenError> {
        let name = node::require_string(subject, "name", "subject", at)?;
        let at_subject = at.child(&name);
        let filter = node::require_string(subject, "filter", "subject", &at_subject)?;

        self.ledger.register(
            &ScopeId::under("subjects", format!("{tenant}/{contract}")),
            &name,
            at,
        )?;
        self.model.contract_subjects.push(ContractSubjectRecord {
            tenant: tenant.to_string(),
            subject: name.clone(),
            contract: contract.to_string(),
        });
        self.model
            .contract_subject_to_filters
            .push(SubjectFilterRecord {
                tenant: tenant.to_string(),
                contract: contract.to_string(),
                subject: name,
                filter: filter.clone(),
            });
        // First reference to a filter name creates it; later references
        // within the tenant reuse the existing record.
        if self
            .ledger
            .observe(&ScopeId::under("filters", tenant), &filter)
        {
            self.model.filters.push(FilterRecord {
                tenant: tenant.to_string(),
                filter,
            });
        }
        Ok(())
    }

    fn bridge_domain(
        &mut self,
        bridge_domain: &Value,
        tenant: &str,
        at: &Breadcrumb,
    ) -> Result<(), FlattenError> {
        let name = node::require_string(bridge_domain, "name", "bridge_domain", at)?;
        let at_bd = at.child(&name);
        let subnets = node::require_entries(bridge_domain, "subnets", "bridge_domain", &at_bd)?;
        let vrf = node::require_string(bridge_domain, "vrf", "bridge_domain", &at_bd)?;
        self.ledger
            .require(&ScopeId::under("vrfs", tenant), "vrf", &vrf, &at_bd)?;

        self.ledger
            .register(&ScopeId::under("bridge_domains", tenant), &name, at)?;
        self.model.bridge_domains.push(BridgeDomainRecord {
            tenant: tenant.to_string(),
            bd: name.clone(),
            vrf,
        });

        for subnet in subnets {
            self.subnet(subnet, tenant, &name, &at_bd)?;
        }
        Ok(())
    }

    fn subnet(
        &mut self,
        subnet: &Value,
        tenant: &str,
        bridge_domain: &str,
        at: &Breadcrumb,
    ) -> Result<(), FlattenError> {
        let gateway = node::require_string(subnet, "name", "subnet", at)?;
        let at_gateway = at.child(&gateway);
        let mask = node::require_mask(subnet, "mask", "subnet", &at_gateway)?;
        let key = format!("{gateway}/{mask}");
        let at_subnet = at.child(&key);
        let visibility = node::require_string(subnet, "scope", "subnet", &at_subnet)?;
        if SubnetVisibility::parse(&visibility).is_none() {
            return Err(FlattenError::InvalidEnumValue {
                field: "scope",
                value: visibility,
                allowed: SubnetVisibility::names(),
                at: at_subnet,
            });
        }

        // Subnets are keyed by "gateway/mask" and scoped to their bridge
        // domain; the same prefix may recur under a sibling bridge domain.
        self.ledger.register(
            &ScopeId::under("subnets", format!("{tenant}/{bridge_domain}")),
            &key,
            at,
        )?;
        self.model
            .bridge_domain_subnets
            .push(BridgeDomainSubnetRecord {
                tenant: tenant.to_string(),
                bd: bridge_domain.to_string(),
                gateway,
                mask,
            });
        Ok(())
    }

    fn application_profile(
        &mut self,
        profile: &Value,
        tenant: &str,
        at: &Breadcrumb,
    ) -> Result<(), FlattenError> {
        let name = node::require_string(profile, "name", "application_profile", at)?;
        let at_profile = at.child(&name);
        let description = node::require_string(profile, "description", "application_profile", &at_profile)?;
        let epgs = node::require_entries(profile, "epgs", "application_profile", &at_profile)?;

        self.ledger
            .register(&ScopeId::under("application_profiles", tenant), &name, at)?;
        self.model
            .application_profiles
            .push(ApplicationProfileRecord {
                tenant: tenant.to_string(),
                ap: name.clone(),
                description,
            });

        for epg in epgs {
            self.endpoint_group(epg, tenant, &name, &at_profile)?;
        }
        Ok(())
    }

    fn endpoint_group(
        &mut self,
        epg: &Value,
        tenant: &str,
        profile: &str,
        at: &Breadcrumb,
    ) -> Result<(), FlattenError> {
        let name = node::require_string(epg, "name", "epg", at)?;
        let at_epg = at.child(&name);
        let bridge_domain = node::require_string(epg, "bd", "epg", &at_epg)?;
        self.ledger.require(
            &ScopeId::under("bridge_domains", tenant),
            "bd",
            &bridge_domain,
            &at_epg,
        )?;
        let bindings = node::require_entries(epg, "contracts", "epg", &at_epg)?;

        self.ledger.register(
            &ScopeId::under("epgs", format!("{tenant}/{profile}")),
            &name,
            at,
        )?;
        self.model.endpoint_groups.push(EndpointGroupRecord {
            tenant: tenant.to_string(),
            ap: profile.to_string(),
            bd: bridge_domain,
            epg: name.clone(),
        });

        for binding in bindings {
            self.contract_binding(binding, tenant, profile, &name, &at_epg)?;
        }
        Ok(())
    }

    fn contract_binding(
        &mut self,
        binding: &Value,
        tenant: &str,
        profile: &str,
        epg: &str,
        at: &Breadcrumb,
    ) -> Result<(), FlattenError> {
        let contract = node::require_string(binding, "name", "epg_contract", at)?;
        self.ledger.require(
            &ScopeId::under("contracts", tenant),
            "contract",
            &contract,
            at,
        )?;
        let at_binding = at.child(&contract);
        let role_raw = node::require_string(binding, "type", "epg_contract", &at_binding)?;
        let role = ContractRole::parse(&role_raw).ok_or_else(|| FlattenError::InvalidEnumValue {
            field: "type",
            value: role_raw.clone(),
            allowed: ContractRole::names(),
            at: at_binding.clone(),
        })?;

        self.model
            .endpoint_group_contracts
            .push(EndpointGroupContractRecord {
                tenant: tenant.to_string(),
                ap: profile.to_string(),
                epg: epg.to_string(),
                contract,
                role,
            });
        Ok(())
    }
}
