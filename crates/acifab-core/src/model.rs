//! # Flat Provisioning Model
//!
//! The relational projection of a validated tenant tree: eleven named
//! collections, each an ordered sequence of records with denormalized
//! foreign keys, so every collection is independently consumable without
//! reconstructing the tree.
//!
//! ## Ordering
//!
//! Records appear in traversal order (depth-first, declaration order), and
//! [`FlatModel`] serializes its collections in a fixed key order. Both
//! orders are an observable contract: downstream consumers diff successive
//! runs and expect byte-stable output for unchanged input.
//!
//! ## Wire keys
//!
//! The short record keys (`bd`, `ap`, `epg`, `type`) are the variable names
//! the downstream provisioning roles already bind to; renaming them would
//! break every existing playbook.

use serde::{Deserialize, Serialize};

use crate::vocab::{ContractRole, ContractScope};

/// One tenant declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRecord {
    /// Tenant name, globally unique.
    pub tenant: String,
    /// Human-readable description.
    pub description: String,
}

/// One routing domain within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VrfRecord {
    /// Owning tenant.
    pub tenant: String,
    /// Vrf name, unique within the tenant.
    pub vrf: String,
}

/// One security contract within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecord {
    /// Owning tenant.
    pub tenant: String,
    /// Contract name, unique within the tenant.
    pub contract: String,
    /// Enforcement scope.
    pub scope: ContractScope,
}

/// One named rule inside a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSubjectRecord {
    /// Owning tenant.
    pub tenant: String,
    /// Subject name, unique within the contract.
    pub subject: String,
    /// Owning contract.
    pub contract: String,
}

/// The subject-to-filter relationship. One record per subject; filters
/// themselves are deduplicated into [`FilterRecord`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectFilterRecord {
    /// Owning tenant.
    pub tenant: String,
    /// Owning contract.
    pub contract: String,
    /// Referencing subject.
    pub subject: String,
    /// Referenced filter name.
    pub filter: String,
}

/// One reusable traffic filter. Emitted on the first reference within a
/// tenant; later references reuse the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRecord {
    /// Owning tenant.
    pub tenant: String,
    /// Filter name.
    pub filter: String,
}

/// One layer-2 segment bound to a vrf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeDomainRecord {
    /// Owning tenant.
    pub tenant: String,
    /// Bridge-domain name, unique within the tenant.
    pub bd: String,
    /// Referenced vrf, declared earlier in the same tenant.
    pub vrf: String,
}

/// One gateway subnet of a bridge domain.
///
/// Visibility is validated on the way in but not projected; the downstream
/// subnet role derives advertisement settings elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeDomainSubnetRecord {
    /// Owning tenant.
    pub tenant: String,
    /// Owning bridge domain.
    pub bd: String,
    /// Gateway address.
    pub gateway: String,
    /// Prefix length.
    pub mask: u8,
}

/// One application profile within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationProfileRecord {
    /// Owning tenant.
    pub tenant: String,
    /// Profile name, unique within the tenant.
    pub ap: String,
    /// Human-readable description.
    pub description: String,
}

/// One endpoint group within an application profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointGroupRecord {
    /// Owning tenant.
    pub tenant: String,
    /// Owning application profile.
    pub ap: String,
    /// Referenced bridge domain, declared earlier in the same tenant.
    pub bd: String,
    /// Endpoint-group name, unique within the profile.
    pub epg: String,
}

/// One contract binding of an endpoint group. An endpoint group may carry
/// any number of bindings, including several to the same contract in
/// different roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointGroupContractRecord {
    /// Owning tenant.
    pub tenant: String,
    /// Owning application profile.
    pub ap: String,
    /// Owning endpoint group.
    pub epg: String,
    /// Referenced contract, declared earlier in the same tenant.
    pub contract: String,
    /// Binding role (consumer or provider). Serialized under the historical
    /// `type` key.
    #[serde(rename = "type")]
    pub role: ContractRole,
}

/// The fully validated, denormalized projection of the tenant tree.
///
/// Field order here is serialization order and must stay fixed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatModel {
    /// Application profiles, one per declaration.
    pub application_profiles: Vec<ApplicationProfileRecord>,
    /// Bridge domains, one per declaration.
    pub bridge_domains: Vec<BridgeDomainRecord>,
    /// Bridge-domain subnets, one per declaration.
    pub bridge_domain_subnets: Vec<BridgeDomainSubnetRecord>,
    /// Contracts, one per declaration.
    pub contracts: Vec<ContractRecord>,
    /// Contract subjects, one per declaration.
    pub contract_subjects: Vec<ContractSubjectRecord>,
    /// Subject-to-filter relationships, one per subject.
    pub contract_subject_to_filters: Vec<SubjectFilterRecord>,
    /// Endpoint groups, one per declaration.
    pub endpoint_groups: Vec<EndpointGroupRecord>,
    /// Endpoint-group contract bindings, one per binding.
    pub endpoint_group_contracts: Vec<EndpointGroupContractRecord>,
    /// Filters, deduplicated per tenant.
    pub filters: Vec<FilterRecord>,
    /// Tenants, one per declaration.
    pub tenants: Vec<TenantRecord>,
    /// Vrfs, one per declaration.
    pub vrfs: Vec<VrfRecord>,
}

impl FlatModel {
    /// Total number of records across all collections.
    pub fn record_count(&self) -> usize {
        self.application_profiles.len()
            + self.bridge_domains.len()
            + self.bridge_domain_subnets.len()
            + self.contracts.len()
            + self.contract_subjects.len()
            + self.contract_subject_to_filters.len()
            + self.endpoint_groups.len()
            + self.endpoint_group_contracts.len()
            + self.filters.len()
            + self.tenants.len()
            + self.vrfs.len()
    }

    /// Whether no records have been emitted.
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_is_empty() {
        let model = FlatModel::default();
        assert!(model.is_empty());
        assert_eq!(model.record_count(), 0);
    }

    #[test]
    fn record_count_sums_all_collections() {
        let mut model = FlatModel::default();
        model.tenants.push(TenantRecord {
            tenant: "prod".to_string(),
            description: "production".to_string(),
        });
        model.vrfs.push(VrfRecord {
            tenant: "prod".to_string(),
            vrf: "v1".to_string(),
        });
        model.filters.push(FilterRecord {
            tenant: "prod".to_string(),
            filter: "allow-web".to_string(),
        });
        assert_eq!(model.record_count(), 3);
        assert!(!model.is_empty());
    }

    #[test]
    fn model_serializes_collections_in_fixed_order() {
        let yaml = serde_yaml::to_string(&FlatModel::default()).unwrap();
        let keys: Vec<&str> = yaml
            .lines()
            .filter_map(|line| line.strip_suffix(": []"))
            .collect();
        assert_eq!(
            keys,
            [
                "application_profiles",
                "bridge_domains",
                "bridge_domain_subnets",
                "contracts",
                "contract_subjects",
                "contract_subject_to_filters",
                "endpoint_groups",
                "endpoint_group_contracts",
                "filters",
                "tenants",
                "vrfs",
            ]
        );
    }

    #[test]
    fn contract_binding_role_serializes_under_type_key() {
        let record = EndpointGroupContractRecord {
            tenant: "prod".to_string(),
            ap: "web".to_string(),
            epg: "frontend".to_string(),
            contract: "web-to-db".to_string(),
            role: ContractRole::Consumer,
        };
        let yaml = serde_yaml::to_string(&record).unwrap();
        assert!(yaml.contains("type: consumer"));
        assert!(!yaml.contains("role:"));
    }

    #[test]
    fn subnet_record_roundtrips_through_serde() {
        let record = BridgeDomainSubnetRecord {
            tenant: "prod".to_string(),
            bd: "web-bd".to_string(),
            gateway: "10.0.0.1".to_string(),
            mask: 24,
        };
        let yaml = serde_yaml::to_string(&record).unwrap();
        let back: BridgeDomainSubnetRecord = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, record);
    }
}
