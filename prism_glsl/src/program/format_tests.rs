use super::*;
use crate::device::TransformFeedbackFormat;
use crate::program::semantic::{AttribSemantic, UniformSemantic};

#[test]
fn defaults() {
    let format = Format::new();
    assert!(format.vertex_source().is_none());
    assert!(format.fragment_source().is_none());
    assert!(format.preprocessing_enabled());
    assert_eq!(format.transform_feedback_format(), TransformFeedbackFormat::InterleavedAttribs);
    assert!(format.transform_feedback_varyings().is_empty());
    assert!(format.defines().is_empty());
    assert!(format.glsl_version().is_none());
    assert_eq!(format.debug_label(), "");
    // Position defaults to location 0.
    assert_eq!(format.semantic_locations.get(&AttribSemantic::Position), Some(&0));
}

#[test]
fn builder_collects_sources_and_settings() {
    let format = Format::new()
        .vertex("void main() {}")
        .fragment("void main() {}")
        .geometry("void main() {}")
        .version(330)
        .define("USE_FOG")
        .define_value("MAX_LIGHTS", "4")
        .label("sky");

    assert_eq!(format.vertex_source(), Some("void main() {}"));
    assert_eq!(format.fragment_source(), Some("void main() {}"));
    assert_eq!(format.geometry_source(), Some("void main() {}"));
    assert!(format.tessellation_ctrl_source().is_none());
    assert_eq!(format.glsl_version(), Some(330));
    assert_eq!(format.defines().len(), 2);
    assert_eq!(format.defines()[0].name, "USE_FOG");
    assert_eq!(format.defines()[1].value.as_deref(), Some("4"));
    assert_eq!(format.debug_label(), "sky");
}

#[test]
fn semantic_mappings_accumulate() {
    let format = Format::new()
        .attrib(AttribSemantic::Position, "inPos")
        .attrib(AttribSemantic::Normal, "inNormal")
        .uniform_semantic(UniformSemantic::ModelViewProjection, "uMvp");

    assert_eq!(format.attrib_semantics().get("inPos"), Some(&AttribSemantic::Position));
    assert_eq!(format.attrib_semantics().get("inNormal"), Some(&AttribSemantic::Normal));
    assert_eq!(
        format.uniform_semantics().get("uMvp"),
        Some(&UniformSemantic::ModelViewProjection)
    );
}

#[test]
fn explicit_locations_and_feedback() {
    let format = Format::new()
        .attrib_location("inPos", 3)
        .attrib_location_semantic(AttribSemantic::Normal, 1)
        .frag_data_location(0, "fragColor")
        .feedback_varyings(["outPos", "outVel"])
        .feedback_format(TransformFeedbackFormat::SeparateAttribs);

    assert_eq!(format.attrib_locations.get("inPos"), Some(&3));
    assert_eq!(format.semantic_locations.get(&AttribSemantic::Normal), Some(&1));
    assert_eq!(format.frag_data_locations.get("fragColor"), Some(&0));
    assert_eq!(format.transform_feedback_varyings(), ["outPos", "outVel"]);
    assert_eq!(format.transform_feedback_format(), TransformFeedbackFormat::SeparateAttribs);
}

#[test]
fn preprocessing_can_be_disabled() {
    let format = Format::new().preprocess(false);
    assert!(!format.preprocessing_enabled());
}
