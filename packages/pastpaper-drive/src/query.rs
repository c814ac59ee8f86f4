//! Typed filter expressions for remote listings.
//!
//! Policy code builds a [`Query`] tree; only [`Query::render`] knows the remote filter syntax.
//! [`Query::matches`] evaluates the same tree locally so in-memory stores and post-filters agree
//! with what the remote would return.

use crate::DriveItem;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
	/// Every child must match. An empty list matches everything and renders to nothing.
	And(Vec<Query>),
	/// At least one child must match. Builders never produce an empty list.
	Or(Vec<Query>),
	InParents(String),
	MimeTypeEq(String),
	NameEq(String),
	NameContains(String),
	Trashed(bool),
}
impl Query {
	/// Nested conjunctions are flattened into one.
	pub fn all(children: impl IntoIterator<Item = Query>) -> Self {
		let mut children: Vec<Query> = children
			.into_iter()
			.flat_map(|child| match child {
				Self::And(inner) => inner,
				other => vec![other],
			})
			.collect();

		if children.len() == 1 {
			return children.remove(0);
		}

		Self::And(children)
	}

	pub fn any(children: impl IntoIterator<Item = Query>) -> Self {
		let mut children: Vec<Query> = children.into_iter().collect();

		if children.len() == 1 {
			return children.remove(0);
		}

		Self::Or(children)
	}

	pub fn in_parents(parent_id: impl Into<String>) -> Self {
		Self::InParents(parent_id.into())
	}

	/// Matches items whose parent is any of `parent_ids`.
	pub fn in_any_parent<I, S>(parent_ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::any(parent_ids.into_iter().map(Self::in_parents))
	}

	pub fn mime_type(mime_type: impl Into<String>) -> Self {
		Self::MimeTypeEq(mime_type.into())
	}

	pub fn name_eq(name: impl Into<String>) -> Self {
		Self::NameEq(name.into())
	}

	pub fn name_contains(fragment: impl Into<String>) -> Self {
		Self::NameContains(fragment.into())
	}

	/// `name contains` for each fragment, OR-ed together. Duplicates are dropped.
	pub fn name_contains_any<I, S>(fragments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut seen: Vec<String> = Vec::new();

		for fragment in fragments {
			let fragment = fragment.into();

			if !seen.contains(&fragment) {
				seen.push(fragment);
			}
		}

		Self::any(seen.into_iter().map(Self::NameContains))
	}

	pub fn not_trashed() -> Self {
		Self::Trashed(false)
	}

	/// Direct child folders of `parent_id`.
	pub fn folders_in(parent_id: impl Into<String>) -> Self {
		Self::all([
			Self::in_parents(parent_id),
			Self::mime_type(crate::FOLDER_MIME_TYPE),
			Self::not_trashed(),
		])
	}

	pub fn render(&self) -> String {
		match self {
			Self::And(children) => render_joined(children, " and "),
			Self::Or(children) => render_joined(children, " or "),
			Self::InParents(id) => format!("'{}' in parents", escape(id)),
			Self::MimeTypeEq(value) => format!("mimeType = '{}'", escape(value)),
			Self::NameEq(value) => format!("name = '{}'", escape(value)),
			Self::NameContains(value) => format!("name contains '{}'", escape(value)),
			Self::Trashed(flag) => format!("trashed = {flag}"),
		}
	}

	/// Local evaluation. `name contains` is case-insensitive, as it is remotely; equality is exact.
	pub fn matches(&self, item: &DriveItem) -> bool {
		match self {
			Self::And(children) => children.iter().all(|child| child.matches(item)),
			Self::Or(children) => children.iter().any(|child| child.matches(item)),
			Self::InParents(id) => item.parents.iter().any(|parent| parent == id),
			Self::MimeTypeEq(value) => item.mime_type == *value,
			Self::NameEq(value) => item.name == *value,
			Self::NameContains(value) =>
				item.name.to_lowercase().contains(value.to_lowercase().as_str()),
			Self::Trashed(flag) => item.trashed == *flag,
		}
	}
}

fn render_joined(children: &[Query], separator: &str) -> String {
	let parts: Vec<String> = children
		.iter()
		.map(|child| match child {
			Query::And(inner) | Query::Or(inner) if inner.len() > 1 => {
				format!("({})", child.render())
			},
			_ => child.render(),
		})
		.filter(|part| !part.is_empty())
		.collect();

	parts.join(separator)
}

fn escape(value: &str) -> String {
	value.replace('\\', "\\\\").replace('\'', "\\'")
}
