mod common;

use {
    common::{FakeDriver, FRAGMENT, FRAGMENT_WITH_TYPO, VERTEX},
    indoc::indoc,
    learngl::graphics::gl_api::{
        diagnostic::MISSING_DIAGNOSTIC, LayoutError, ShaderError,
        ShaderProgram, ShaderSource, ShaderStage, Uniform, VertexLayout,
    },
    std::{io::Write, rc::Rc},
};

const COLOR_VERTEX: &str = indoc! {"
    #version 330 core
    layout (location = 0) in vec3 aPos;
    layout (location = 1) in vec3 aColor;

    out vec3 ourColor;

    void main() {
        gl_Position = vec4(aPos, 1.0);
        ourColor = aColor;
    }
"};

const COLOR_FRAGMENT: &str = indoc! {"
    #version 330 core
    in vec3 ourColor;
    out vec4 FragColor;

    uniform float brightness;

    void main() {
        FragColor = vec4(ourColor * brightness, 1.0);
    }
"};

fn driver() -> Rc<FakeDriver> {
    Rc::new(FakeDriver::new())
}

fn color_program(device: &Rc<FakeDriver>) -> ShaderProgram<FakeDriver> {
    ShaderProgram::from_sources(device.clone(), COLOR_VERTEX, COLOR_FRAGMENT)
        .unwrap()
}

#[test]
fn valid_sources_link_and_can_be_activated() {
    let device = driver();

    let program =
        ShaderProgram::from_sources(device.clone(), VERTEX, FRAGMENT).unwrap();
    program.activate();

    assert_eq!(device.active_program(), unsafe { program.raw() });
    assert_eq!(program.info_log(), "");
}

#[test]
fn stages_are_released_once_linking_completes() {
    let device = driver();

    let program =
        ShaderProgram::from_sources(device.clone(), VERTEX, FRAGMENT).unwrap();

    assert_eq!(device.created_shaders().len(), 2);
    assert_eq!(device.deleted_shaders(), device.created_shaders());
    assert!(device.deleted_programs().is_empty());

    drop(program);
    assert!(device.everything_released_once());
}

#[test]
fn syntax_errors_fail_at_the_compile_step() {
    let device = driver();

    let err =
        ShaderProgram::from_sources(device.clone(), VERTEX, FRAGMENT_WITH_TYPO)
            .unwrap_err();

    match &err {
        ShaderError::Compile { stage, diagnostic } => {
            assert_eq!(*stage, ShaderStage::Fragment);
            assert!(!diagnostic.is_empty());
            assert!(diagnostic.contains("syntax error"), "{}", diagnostic);
        }
        other => panic!("expected a compile failure, got {:?}", other),
    }
    assert!(device.created_programs().is_empty());
    assert!(device.everything_released_once());
}

#[test]
fn a_failing_vertex_stage_stops_construction() {
    let device = driver();
    let broken_vertex = "#version 330 core\nvoid main( {}";

    let err =
        ShaderProgram::from_sources(device.clone(), broken_vertex, FRAGMENT)
            .unwrap_err();

    assert!(matches!(
        err,
        ShaderError::Compile {
            stage: ShaderStage::Vertex,
            ..
        }
    ));
    assert_eq!(device.created_shaders().len(), 1);
    assert!(device.everything_released_once());
}

#[test]
fn mismatched_interfaces_fail_at_the_link_step() {
    let device = driver();
    let fragment = COLOR_FRAGMENT.replace("ourColor", "vertexColor");

    let err =
        ShaderProgram::from_sources(device.clone(), COLOR_VERTEX, &fragment)
            .unwrap_err();

    match &err {
        ShaderError::Link { diagnostic } => {
            assert!(diagnostic.contains("vertexColor"), "{}", diagnostic);
        }
        other => panic!("expected a link failure, got {:?}", other),
    }
    assert!(err.diagnostic().is_some());
    assert_eq!(device.created_programs().len(), 1);
    assert_eq!(device.deleted_programs(), device.created_programs());
    assert!(device.everything_released_once());
}

#[test]
fn empty_driver_logs_still_produce_a_diagnostic() {
    let device = Rc::new(FakeDriver::silent());

    let compile_err =
        ShaderProgram::from_sources(device.clone(), VERTEX, FRAGMENT_WITH_TYPO)
            .unwrap_err();
    assert_eq!(compile_err.diagnostic(), Some(MISSING_DIAGNOSTIC));

    let link_err = ShaderProgram::from_sources(
        device.clone(),
        COLOR_VERTEX,
        &COLOR_FRAGMENT.replace("ourColor", "vertexColor"),
    )
    .unwrap_err();
    assert_eq!(link_err.diagnostic(), Some(MISSING_DIAGNOSTIC));
}

#[test]
fn unknown_uniforms_are_skipped() {
    let device = driver();
    let program = color_program(&device);

    program.set_uniform("brightnes", 0.5f32);
    assert!(device.uploads().is_empty());

    program.set_uniform("brightness", 0.5f32);
    let raw = unsafe { program.raw() };
    let location = program.uniform_location("brightness").unwrap();
    assert_eq!(device.uploads(), vec![(raw, location, Uniform::Float(0.5))]);
}

#[test]
fn setting_a_uniform_activates_the_program() {
    let device = driver();
    let first = color_program(&device);
    let second = color_program(&device);

    second.activate();
    first.set_uniform("brightness", true);

    assert_eq!(device.active_program(), unsafe { first.raw() });
    assert_eq!(device.uploads()[0].2, Uniform::Int(1));
}

#[test]
fn uniform_locations_are_cached() {
    let device = driver();
    let program = color_program(&device);

    for _ in 0..3 {
        program.set_uniform("brightness", 1.0f32);
        program.set_uniform("missing", 1.0f32);
    }

    assert_eq!(device.uniform_lookups(), 2);
    assert_eq!(device.uploads().len(), 3);
}

#[test]
fn uniform_names_with_nul_bytes_are_skipped() {
    let device = driver();
    let program = color_program(&device);

    program.set_uniform("bright\0ness", 1.0f32);

    assert_eq!(program.uniform_location("bright\0ness"), None);
    assert!(device.uploads().is_empty());
}

#[test]
fn link_warnings_are_kept() {
    let device = driver();
    let vertex = COLOR_VERTEX.replace(
        "out vec3 ourColor;",
        "out vec3 ourColor;\nout vec2 unusedCoord;",
    );

    let program =
        ShaderProgram::from_sources(device.clone(), &vertex, COLOR_FRAGMENT)
            .unwrap();

    assert!(program.info_log().contains("unusedCoord"));
}

#[test]
fn interior_nul_bytes_are_rejected_before_compiling() {
    let device = driver();

    let err =
        ShaderProgram::from_sources(device.clone(), "#version\0 330", FRAGMENT)
            .unwrap_err();

    assert!(matches!(
        err,
        ShaderError::InvalidSource {
            stage: ShaderStage::Vertex,
            ..
        }
    ));
    assert!(device.created_shaders().is_empty());
}

#[test]
fn programs_can_be_built_from_files() {
    let device = driver();
    let mut vert = tempfile::NamedTempFile::new().unwrap();
    let mut frag = tempfile::NamedTempFile::new().unwrap();
    vert.write_all(COLOR_VERTEX.as_bytes()).unwrap();
    frag.write_all(COLOR_FRAGMENT.as_bytes()).unwrap();

    let program =
        ShaderProgram::from_files(device.clone(), vert.path(), frag.path())
            .unwrap();

    assert_eq!(program.attribute_location("aColor"), Some(1));
}

#[test]
fn missing_files_are_distinct_from_invalid_source() {
    let device = driver();
    let dir = tempfile::tempdir().unwrap();

    let err = ShaderProgram::from_files(
        device.clone(),
        dir.path().join("shader.vert"),
        dir.path().join("shader.frag"),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ShaderError::SourceUnavailable {
            stage: ShaderStage::Vertex,
            ..
        }
    ));
    assert!(err.diagnostic().is_none());
    assert!(device.created_shaders().is_empty());
}

#[test]
fn rebuilding_from_new_source_after_a_failure_works() {
    let device = driver();
    let mut source = ShaderSource::new(VERTEX, FRAGMENT_WITH_TYPO);

    assert!(ShaderProgram::new(device.clone(), &source).is_err());

    source.fragment = FRAGMENT.to_owned();
    let program = ShaderProgram::new(device.clone(), &source).unwrap();
    program.activate();

    assert_eq!(device.active_program(), unsafe { program.raw() });
}

#[test]
fn vertex_layouts_are_checked_against_program_attributes() {
    let device = driver();
    let program = color_program(&device);

    let matching = VertexLayout::new(24)
        .with_attribute("aPos", 0, 3, 0)
        .with_attribute("aColor", 1, 3, 12);
    assert_eq!(matching.check_program(&program), Ok(()));

    let swapped = VertexLayout::new(24)
        .with_attribute("aPos", 1, 3, 0)
        .with_attribute("aColor", 0, 3, 12);
    assert_eq!(
        swapped.check_program(&program),
        Err(LayoutError::LocationMismatch {
            name: "aPos".to_owned(),
            layout: 1,
            program: 0,
        })
    );

    // drivers drop inputs the shader never reads, so unknown names pass
    let with_unused = VertexLayout::new(32)
        .with_attribute("aPos", 0, 3, 0)
        .with_attribute("aColor", 1, 3, 12)
        .with_attribute("aTexCoord", 2, 2, 24);
    assert_eq!(with_unused.validate(), Ok(()));
    assert_eq!(with_unused.check_program(&program), Ok(()));
}
