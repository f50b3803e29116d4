use isa_config_gen::{
    cfg::Config, compile, extract, template::Options, writer, Inputs, Path, PathBuf, SchemaKind,
    Style,
};

fn miappe() -> Inputs {
    let dir = Path::new("tests/test_data/miappe");
    Inputs {
        investigation: dir.join("i_investigation.xml"),
        study: dir.join("s_study.xml"),
        assay: dir.join("a_assay.xml"),
    }
}

fn options(style: Style) -> Options {
    Options {
        style,
        ..Default::default()
    }
}

/// The constant declarations of the enum `name` in a generated class
fn enum_body<'s>(source: &'s str, name: &str) -> &'s str {
    let open = format!("public enum {name} implements ");
    let start = source.find(&open).expect("enum not found");
    let body = &source[start..];
    let body = &body[body.find('{').unwrap() + 1..];
    let end = body.find("\t\tprivate String fieldName;").unwrap();
    body[..end].trim()
}

#[test]
fn extracts_every_prefixed_field() {
    let inputs = miappe();

    for (kind, path, prefix) in [
        (SchemaKind::Investigation, &inputs.investigation, "Comment["),
        (SchemaKind::Study, &inputs.study, "Characteristics["),
        (SchemaKind::Assay, &inputs.assay, "Characteristics["),
    ] {
        let contents = std::fs::read_to_string(path).unwrap();
        let doc = roxmltree::Document::parse(&contents).unwrap();
        let expected: Vec<_> = doc
            .descendants()
            .filter(|n| n.has_tag_name(("http://www.ebi.ac.uk/bii/isatab_configuration#", "field")))
            .filter_map(|n| n.attribute("header"))
            .filter(|h| h.starts_with(prefix))
            .collect();

        let fields = extract::load(path, kind).unwrap();
        let headers: Vec<_> = fields.iter().map(|f| f.header.as_str()).collect();
        assert_eq!(headers, expected, "{kind}");
    }
}

#[test]
fn basic_class() {
    let source = compile("MIAPPEv1x1", &miappe(), &options(Style::Basic)).unwrap();

    let investigation = enum_body(&source, "InvestigationFile");
    assert_eq!(investigation.matches("InvestigationAttribute.").count(), 6);
    for constant in [
        "INVESTIGATION_LICENSE(\"Investigation License\", InvestigationAttribute.INVESTIGATION, false),",
        "MIAPPE_VERSION(\"MIAPPE Version\", InvestigationAttribute.INVESTIGATION, true),",
        "CREATED_WITH_CONFIGURATION(\"Created With Configuration\", InvestigationAttribute.INVESTIGATION, false),",
        "INVESTIGATION_PERSON_ID(\"Investigation Person ID\", InvestigationAttribute.INVESTIGATION_CONTACTS, false),",
        "STUDY_START_DATE(\"Study Start Date\", InvestigationAttribute.STUDY, true),",
        "STUDY_DESIGN_DESCRIPTION(\"Study Design Description\", InvestigationAttribute.STUDY_DESIGN_DESCRIPTORS, true);",
    ] {
        assert!(investigation.contains(constant), "{constant}");
    }
    assert!(investigation.contains("     * [required]The version of MIAPPE used."));
    assert!(investigation.contains(
        "     * License for the reuse of the data associated with this investigation. The Creative Commons"
    ));
    assert!(!investigation.contains("INVESTIGATION_IDENTIFIER"));

    let study = enum_body(&source, "StudyFile");
    let constants: Vec<_> = study
        .lines()
        .map(str::trim)
        .filter(|l| !l.starts_with('*') && !l.starts_with("/**"))
        .collect();
    assert_eq!(
        constants,
        [
            "ORGANISM(\"Organism\", true, 0),",
            "GENUS(\"Genus\", false, 0),",
            "OBSERVATION_UNIT_TYPE(\"Observation Unit Type\", true, 2),",
            "SPATIAL_DISTRIBUTION(\"Spatial Distribution\", false, 2);",
        ]
    );

    let assay = enum_body(&source, "AssayFile");
    assert!(assay.ends_with("OBSERVATION_UNIT_TYPE(\"Observation Unit Type\", false, 0);"));

    assert!(source.contains("validateCustomProperties(study);"));
    assert!(source.contains("validateCustomProperties(assay);"));
}

#[test]
fn extended_class() {
    let source = compile("MIAPPEv1x1", &miappe(), &options(Style::Extended)).unwrap();

    insta::assert_snapshot!(enum_body(&source, "AssayFile"), @r###"
    /**
         * Type of observation unit in textual form, usually one of the following: study, block, sub-block, plot, sub-plot, pot, plant
         * <br>
         * placeholder
         * <br>
         * [optional]
         * <br>
         */
        OBSERVATION_UNIT_TYPE("Observation Unit Type", false, 0);
    "###);

    let investigation = enum_body(&source, "InvestigationFile");
    assert!(investigation.contains(
        "     * Comment[Created with configuration]\n     * <br>\n     * [optional]\n     * <br>\n     */\n    CREATED_WITH_CONFIGURATION("
    ));
    assert!(investigation.contains(
        "     * The version of MIAPPE used.\n     * <br>\n     * 1.1\n     * <br>\n     * <b>[required]</b>\n"
    ));

    assert!(source.contains("GeneralValidation.validateStudyFile(study);"));
}

#[test]
fn output_is_deterministic() {
    let td = tempfile::tempdir().unwrap();
    let dir = Path::from_path(td.path()).unwrap();

    let mut written = Vec::new();
    for _ in 0..2 {
        let source = compile("MIAPPEv1x1", &miappe(), &options(Style::Extended)).unwrap();
        let path = writer::write_class(dir, "MIAPPEv1x1", &source).unwrap();
        written.push(std::fs::read(path).unwrap());
    }

    assert_eq!(written[0], written[1]);
}

#[test]
fn configured_class() {
    let cfg = Config::parse(
        "isa-config-gen.toml",
        r#"
package = "org.example.isa"
style = "extended"
authors = ["psaroudakis", "arendd"]
description = "MIAPPEv1.1 validation class"
"#,
    )
    .unwrap();

    let source = compile("Miappe", &miappe(), &cfg.into_options(None)).unwrap();

    assert!(source.starts_with("package org.example.isa;\n"));
    assert!(source.contains(
        "/**\n * MIAPPEv1.1 validation class\n * @author psaroudakis, arendd\n */\npublic class Miappe {\n"
    ));
}

#[test]
fn malformed_xml_names_the_file() {
    let td = tempfile::tempdir().unwrap();
    let broken = PathBuf::from_path_buf(td.path().join("s_broken.xml")).unwrap();
    std::fs::write(&broken, "<isatab-config-file><field header=\"Characteristics[Organism]\">").unwrap();

    let inputs = Inputs {
        study: broken.clone(),
        ..miappe()
    };

    let err = compile("Broken", &inputs, &Options::default()).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.starts_with(&format!("failed to extract Study fields from '{broken}'")), "{msg}");
    assert!(msg.contains("failed to parse XML in"), "{msg}");
}

#[test]
fn missing_input() {
    let inputs = Inputs {
        assay: "tests/test_data/miappe/nope.xml".into(),
        ..miappe()
    };

    let err = compile("Missing", &inputs, &Options::default()).unwrap_err();
    assert!(format!("{err:#}").contains("nope.xml"));
}

#[test]
fn invalid_class_name() {
    assert!(compile("My Config", &miappe(), &Options::default()).is_err());
}
