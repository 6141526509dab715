//! Domain groups and domain selectors accepted by the `mail_type` order parameter.

// self
use crate::_prelude::*;

/// Provider-defined categories of email domains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainGroup {
	/// Any domain owned by the provider (`*.site`, `*.blog`, `*.pro`, ...).
	#[serde(rename = "ALL")]
	Kopeechka,
	/// Any trusted public domain (`gmail.com`, `yahoo.com`, ...).
	#[serde(rename = "REAL")]
	Trusted,
	/// Any private domain owned by the client.
	#[serde(rename = "mine")]
	Private,
	/// Any domain from the `gmx` group.
	#[serde(rename = "GMX")]
	Gmx,
	/// Any domain from the `yandex` group.
	#[serde(rename = "YANDEX")]
	Yandex,
	/// Any domain from the `mail.ru` group.
	#[serde(rename = "MAILRU")]
	Mailru,
	/// Any domain from the `outlook` and `hotmail` group.
	#[serde(rename = "OUTLOOK")]
	Outlook,
	/// Any domain from the `mail.com` group.
	#[serde(rename = "MAILCOM")]
	Mailcom,
	/// Any domain from the `rambler` group.
	#[serde(rename = "RAMBLER")]
	Rambler,
}
impl DomainGroup {
	/// Returns the wire token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Kopeechka => "ALL",
			Self::Trusted => "REAL",
			Self::Private => "mine",
			Self::Gmx => "GMX",
			Self::Yandex => "YANDEX",
			Self::Mailru => "MAILRU",
			Self::Outlook => "OUTLOOK",
			Self::Mailcom => "MAILCOM",
			Self::Rambler => "RAMBLER",
		}
	}
}
impl Display for DomainGroup {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A single `mail_type` entry: either a concrete domain or a whole group.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DomainSelector {
	/// Concrete domain such as `gmail.com`.
	Domain(String),
	/// Provider-defined group.
	Group(DomainGroup),
}
impl DomainSelector {
	/// Returns the wire token.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Domain(domain) => domain,
			Self::Group(group) => group.as_str(),
		}
	}
}
impl From<DomainGroup> for DomainSelector {
	fn from(group: DomainGroup) -> Self {
		Self::Group(group)
	}
}
impl From<&str> for DomainSelector {
	fn from(domain: &str) -> Self {
		Self::Domain(domain.to_owned())
	}
}
impl From<String> for DomainSelector {
	fn from(domain: String) -> Self {
		Self::Domain(domain)
	}
}
impl Display for DomainSelector {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Joins selectors into the comma-separated `mail_type` value.
pub(crate) fn join_selectors(selectors: &[DomainSelector]) -> Option<String> {
	if selectors.is_empty() {
		return None;
	}

	let mut buf = String::new();

	for (idx, selector) in selectors.iter().enumerate() {
		if idx > 0 {
			buf.push(',');
		}

		buf.push_str(selector.as_str());
	}

	Some(buf)
}
