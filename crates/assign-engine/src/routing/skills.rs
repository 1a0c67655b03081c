//! # Skill Requirement Inference
//!
//! Tickets rarely name the skill they need. This module infers one from the
//! ticket text with a [`SkillKeywordTable`]: every skill lists technical
//! keywords, and the skill with the most distinct keyword hits becomes the
//! ticket's requirement. Ties go to the skill listed first. Text that hits
//! no keyword gets no requirement, which the scorer treats as neutral.

use serde::{Deserialize, Serialize};

use crate::error::{AssignError, Result};
use crate::priority::{phrase_positions, tokenize};

/// Keywords pointing at one agent skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillKeywords {
    /// Skill name as it appears in agent profiles
    pub skill: String,
    /// Keywords and phrases suggesting the skill
    pub keywords: Vec<String>,
}

/// Ordered skill keyword table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillKeywordTable {
    /// Skills in priority order for tie-breaking
    pub skills: Vec<SkillKeywords>,
}

impl SkillKeywordTable {
    /// Table with no skills; inference always yields no requirement
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a skill with its keywords
    pub fn with_skill(mut self, skill: &str, keywords: &[&str]) -> Self {
        self.skills.push(SkillKeywords {
            skill: skill.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        });
        self
    }

    /// Check skill names and keywords are non-blank and skills unique
    pub fn validate(&self) -> Result<()> {
        for (index, entry) in self.skills.iter().enumerate() {
            if entry.skill.trim().is_empty() {
                return Err(AssignError::configuration(format!(
                    "skill entry {} has an empty name",
                    index
                )));
            }
            if self.skills[..index]
                .iter()
                .any(|earlier| earlier.skill.eq_ignore_ascii_case(&entry.skill))
            {
                return Err(AssignError::configuration(format!(
                    "skill '{}' is listed twice",
                    entry.skill
                )));
            }
            if entry.keywords.iter().any(|keyword| tokenize(keyword).is_empty()) {
                return Err(AssignError::configuration(format!(
                    "skill '{}' has a keyword without words",
                    entry.skill
                )));
            }
        }
        Ok(())
    }

    /// Production skill table covering the service desk's nineteen skills
    pub fn standard() -> Self {
        Self::empty()
            .with_skill(
                "Networking",
                &[
                    "vpn", "network", "networking", "router", "switch", "firewall", "dns", "dhcp",
                    "tcp", "ip", "subnet", "vlan", "wifi", "wireless", "connection",
                    "connectivity", "ping", "traceroute", "bandwidth",
                ],
            )
            .with_skill(
                "Linux_Administration",
                &[
                    "linux", "ubuntu", "centos", "redhat", "bash", "shell", "terminal", "ssh",
                    "sudo", "chmod", "chown", "cron", "systemd", "apache", "nginx", "mysql",
                    "postgresql", "server", "unix",
                ],
            )
            .with_skill(
                "Cloud_AWS",
                &[
                    "aws", "amazon", "ec2", "s3", "cloudformation", "lambda", "rds", "vpc",
                    "cloudwatch", "iam", "route53", "elb", "auto scaling", "azure", "cloud",
                    "hosting",
                ],
            )
            .with_skill(
                "VPN_Troubleshooting",
                &[
                    "vpn", "tunnel", "ipsec", "l2tp", "pptp", "openvpn", "remote access",
                    "site-to-site", "authentication", "concentrator", "client", "endpoint",
                ],
            )
            .with_skill(
                "Hardware_Diagnostics",
                &[
                    "hardware", "diagnostic", "memory", "ram", "cpu", "disk", "ssd", "hdd",
                    "motherboard", "power supply", "fan", "temperature", "bios", "uefi", "boot",
                    "post",
                ],
            )
            .with_skill(
                "Windows_Server_2022",
                &[
                    "windows server", "server 2022", "server 2019", "server 2016", "iis",
                    "hyper-v", "powershell", "registry", "event viewer", "services", "roles",
                    "features",
                ],
            )
            .with_skill(
                "Active_Directory",
                &[
                    "active directory", "ad", "domain controller", "dc", "group policy", "gpo",
                    "ldap", "kerberos", "ntlm", "forest", "domain", "ou", "user account",
                    "computer account",
                ],
            )
            .with_skill(
                "Virtualization_VMware",
                &[
                    "vmware", "vsphere", "vcenter", "esxi", "virtual machine", "vm",
                    "hypervisor", "virtualization", "snapshot", "vmotion", "ha", "drs",
                ],
            )
            .with_skill(
                "Software_Licensing",
                &[
                    "license", "licensing", "activation", "key", "volume licensing", "cal",
                    "subscription", "office 365", "microsoft 365",
                ],
            )
            .with_skill(
                "Network_Security",
                &[
                    "security", "firewall", "intrusion", "malware", "antivirus", "threat",
                    "vulnerability", "patch", "encryption", "certificate", "ssl", "tls",
                ],
            )
            .with_skill(
                "Database_SQL",
                &[
                    "database", "sql", "mysql", "postgresql", "oracle", "sql server", "query",
                    "table", "index", "backup", "restore", "replication",
                ],
            )
            .with_skill(
                "Firewall_Configuration",
                &[
                    "firewall", "iptables", "pfsense", "checkpoint", "fortigate", "cisco asa",
                    "rules", "acl", "port", "protocol", "block", "allow",
                ],
            )
            .with_skill(
                "Identity_Management",
                &[
                    "identity", "sso", "saml", "oauth", "ldap", "authentication",
                    "authorization", "mfa", "2fa", "identity provider", "federation",
                ],
            )
            .with_skill(
                "SaaS_Integrations",
                &[
                    "saas", "integration", "api", "webhook", "connector", "salesforce",
                    "servicenow", "slack", "teams", "sharepoint", "onedrive",
                ],
            )
            .with_skill(
                "Microsoft_365",
                &[
                    "microsoft 365", "office 365", "outlook", "word", "excel", "powerpoint",
                    "teams", "sharepoint", "onedrive", "exchange", "azure ad",
                ],
            )
            .with_skill(
                "SharePoint_Online",
                &[
                    "sharepoint", "sharepoint online", "site collection", "document library",
                    "list", "workflow", "permissions", "search", "content type",
                ],
            )
            .with_skill(
                "PowerShell_Scripting",
                &[
                    "powershell", "script", "cmdlet", "pipeline", "automation", "dsc",
                    "remoting", "ise", "gallery", "module",
                ],
            )
            .with_skill(
                "Laptop_Repair",
                &[
                    "laptop", "notebook", "screen", "keyboard", "touchpad", "battery", "charger",
                    "adapter", "hinge", "repair",
                ],
            )
            .with_skill(
                "Printer_Support",
                &[
                    "printer", "printing", "toner", "ink", "paper jam", "queue", "driver",
                    "spooler", "network printer",
                ],
            )
    }
}

/// Skill inferred for a ticket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillInference {
    /// Winning skill name
    pub skill: String,
    /// Distinct keywords of that skill found in the text
    pub matched_keywords: Vec<String>,
}

/// Infers a ticket's skill requirement from its text
///
/// # Examples
///
/// ```
/// use helpdesk_assign_engine::routing::SkillInferer;
///
/// let inferer = SkillInferer::standard();
/// let inference = inferer.infer("Remote users lose the VPN tunnel after the IPsec rekey").unwrap();
/// assert_eq!(inference.skill, "VPN_Troubleshooting");
///
/// assert!(inferer.infer("Please order more coffee").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SkillInferer {
    table: SkillKeywordTable,
    compiled: Vec<Vec<(String, Vec<String>)>>,
}

impl SkillInferer {
    /// Build an inferer from a validated table
    pub fn new(table: SkillKeywordTable) -> Result<Self> {
        table.validate()?;
        let compiled = table
            .skills
            .iter()
            .map(|entry| {
                entry
                    .keywords
                    .iter()
                    .map(|keyword| (keyword.clone(), tokenize(keyword)))
                    .collect()
            })
            .collect();
        Ok(Self { table, compiled })
    }

    /// Inferer over [`SkillKeywordTable::standard`]
    pub fn standard() -> Self {
        Self::new(SkillKeywordTable::standard()).expect("standard skill table is valid")
    }

    /// Table in use
    pub fn table(&self) -> &SkillKeywordTable {
        &self.table
    }

    /// Infer the best matching skill, if any keyword matches
    pub fn infer(&self, text: &str) -> Option<SkillInference> {
        let tokens = tokenize(text);
        let mut best: Option<(usize, Vec<String>)> = None;

        for (index, keywords) in self.compiled.iter().enumerate() {
            let mut matched: Vec<String> = Vec::new();
            for (keyword, keyword_tokens) in keywords {
                if !phrase_positions(&tokens, keyword_tokens).is_empty() && !matched.contains(keyword) {
                    matched.push(keyword.clone());
                }
            }
            if matched.is_empty() {
                continue;
            }
            // strictly greater keeps the earlier skill on ties
            if best.as_ref().map_or(true, |(_, current)| matched.len() > current.len()) {
                best = Some((index, matched));
            }
        }

        best.map(|(index, matched_keywords)| SkillInference {
            skill: self.table.skills[index].skill.clone(),
            matched_keywords,
        })
    }
}
