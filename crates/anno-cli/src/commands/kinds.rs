//! `anno kinds`: list the closed enumerations and their wire tags.

use std::collections::BTreeMap;

use anno_core::enums::{
    AnnotationKind, AnnotationSource, BinaryAssetKind, DataLossReason, QuestionKind, UserKind,
    WireTag,
};

use crate::output;

fn tags<E: WireTag>() -> (&'static str, Vec<&'static str>) {
    (E::FAMILY, E::ALL.iter().map(|member| member.tag()).collect())
}

/// Enumeration name → wire tags in declaration order.
pub fn collect() -> BTreeMap<&'static str, Vec<&'static str>> {
    BTreeMap::from([
        tags::<AnnotationSource>(),
        tags::<AnnotationKind>(),
        tags::<QuestionKind>(),
        tags::<UserKind>(),
        tags::<BinaryAssetKind>(),
        tags::<DataLossReason>(),
    ])
}

/// Handle `anno kinds`.
pub fn handle(pretty: bool) -> anyhow::Result<()> {
    output::output(&collect(), pretty)
}
