//! End-to-end resolution and generation against the fixture registry.

use greg_generator::{
    assemble, template, Api, Diagnostic, Fragment, GregGenerator, Manifest, OutputBundle, Profile, Registry, Target,
    Version,
};
use pretty_assertions::assert_eq;

fn registry() -> Registry {
    Registry::from_str(include_str!("fixtures/gl.xml")).unwrap()
}

fn run(api: Api, version: (u32, u32), profile: Profile, extensions: &[&str]) -> (Manifest, OutputBundle) {
    let registry = registry();
    let target = Target::new(api, version, profile, extensions.iter().copied());
    let manifest = Manifest::resolve(&registry, &target);
    let bundle = assemble(&GregGenerator::default(), &registry, &manifest, &target).unwrap();
    (manifest, bundle)
}

fn all_output(bundle: &OutputBundle) -> String {
    Fragment::ALL.iter().map(|f| bundle.get(*f)).collect()
}

#[test]
fn identical_inputs_give_identical_results() {
    let first = run(Api::Gl, (4, 6), Profile::Core, &["GL_KHR_debug", "GL_EXT_relegacy"]);
    let second = run(Api::Gl, (4, 6), Profile::Core, &["GL_EXT_relegacy", "GL_KHR_debug"]);
    assert_eq!(first, second);
}

#[test]
fn names_required_twice_are_emitted_once() {
    // GL_BUFFER comes from both GL_VERSION_4_10 and GL_KHR_debug
    let (manifest, bundle) = run(Api::Gl, (4, 10), Profile::None, &["GL_KHR_debug"]);
    assert!(manifest.enums.contains("GL_BUFFER"));
    assert_eq!(bundle.get(Fragment::EnumDefinitions).matches("#define GL_BUFFER ").count(), 1);
}

#[test]
fn version_ceiling_compares_major_then_minor() {
    let (manifest, _) = run(Api::Gl, (4, 1), Profile::None, &[]);
    let names = manifest.versions.iter().map(|v| v.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["GL_VERSION_1_0", "GL_VERSION_3_2"]);
    assert!(manifest.versions.iter().all(|v| v.version <= Version::new(4, 1)));
    assert!(!manifest.enums.contains("GL_BUFFER"));

    let (manifest, bundle) = run(Api::Gl, (4, 10), Profile::None, &[]);
    assert_eq!(manifest.versions.last().unwrap().version, Version::new(4, 10));
    assert!(bundle.get(Fragment::VerLoaders).contains("GREG_VERSION_4_10 = gregVersionSupported(4, 10);"));
}

#[test]
fn core_profile_removal() {
    let (manifest, bundle) = run(Api::Gl, (3, 2), Profile::Core, &[]);
    assert!(!manifest.commands.contains("glBegin"));
    assert!(!manifest.enums.contains("GL_LIGHTING"));
    assert!(!all_output(&bundle).contains("glBegin"));

    let (manifest, _) = run(Api::Gl, (1, 0), Profile::Core, &[]);
    assert!(manifest.commands.contains("glBegin"));

    let (manifest, _) = run(Api::Gl, (3, 2), Profile::None, &[]);
    assert!(manifest.commands.contains("glBegin"));
    assert!(manifest.enums.contains("GL_LIGHTING"));
}

#[test]
fn remove_blocks_follow_their_profile_scope() {
    let (manifest, _) = run(Api::Glsc2, (2, 1), Profile::Core, &[]);
    // the unscoped block applies under core, the compatibility one does not
    assert!(!manifest.enums.contains("GL_TRUE"));
    assert!(manifest.enums.contains("GL_FALSE"));
    assert!(manifest.enums.contains("GL_VERSION"));
    let commands = manifest.commands.iter().map(String::as_str).collect::<Vec<_>>();
    assert_eq!(commands, vec!["glFinish", "glGetString"]);

    // without a profile no block applies
    let (manifest, _) = run(Api::Glsc2, (2, 1), Profile::None, &[]);
    assert!(manifest.enums.contains("GL_TRUE"));
    assert!(manifest.commands.contains("glGetString"));

    // below the removing feature nothing is dropped
    let (manifest, _) = run(Api::Glsc2, (2, 0), Profile::Core, &[]);
    assert!(manifest.enums.contains("GL_TRUE"));
}

#[test]
fn extension_re_requires_removed_command() {
    let (manifest, bundle) = run(Api::Gl, (3, 2), Profile::Core, &["GL_EXT_relegacy"]);
    assert!(manifest.commands.contains("glBegin"));
    assert!(bundle.get(Fragment::CmdMacros).contains("#define glBegin greg_glBegin\n"));
    // only what the extension lists comes back
    assert!(!manifest.enums.contains("GL_LIGHTING"));
}

#[test]
fn zero_parameter_command_renders_void() {
    let (_, bundle) = run(Api::Gl, (1, 0), Profile::None, &[]);
    assert!(bundle.get(Fragment::CmdTypedefs).contains("typedef void  (GLAPIENTRY *PFNGLFINISHPROC)(void);\n"));
    assert!(bundle
        .get(Fragment::CmdTypedefs)
        .contains("typedef const GLubyte * (GLAPIENTRY *PFNGLGETSTRINGPROC)(GLenum);\n"));
}

#[test]
fn extensions_for_other_apis_are_excluded() {
    let (manifest, bundle) = run(Api::Gl, (4, 6), Profile::None, &["GL_OES_legacy", "GL_KHR_debug"]);
    assert_eq!(manifest.extensions, vec!["GL_KHR_debug".to_string()]);
    assert_eq!(
        manifest.diagnostics,
        vec![Diagnostic::UnsupportedExtension { name: "GL_OES_legacy".into(), token: "gl" }]
    );
    assert!(!all_output(&bundle).contains("GL_OES_legacy"));
    assert!(!all_output(&bundle).contains("GREG_OES_legacy"));
}

#[test]
fn gl_only_extension_is_excluded_under_core() {
    let (manifest, _) = run(Api::Gl, (4, 6), Profile::Core, &["GL_ARB_compatibility"]);
    assert!(manifest.extensions.is_empty());
    assert!(!manifest.commands.contains("glBegin"));
    assert_eq!(
        manifest.diagnostics,
        vec![Diagnostic::UnsupportedExtension { name: "GL_ARB_compatibility".into(), token: "glcore" }]
    );
}

#[test]
fn parameter_types_pull_in_their_dependencies() {
    let (manifest, bundle) = run(Api::Gl, (3, 2), Profile::Core, &[]);
    assert!(manifest.types.contains("GLsync"));
    assert!(manifest.types.contains("GLuint64"));
    assert!(manifest.types.contains("khrplatform"));
    assert!(manifest.types.contains("GLubyte"));

    assert_eq!(
        bundle.get(Fragment::TypeTypedefs),
        "#include <KHR/khrplatform.h>\n\
         typedef unsigned int GLenum;\n\
         typedef unsigned char GLubyte;\n\
         typedef khronos_uint64_t GLuint64;\n\
         typedef struct __GLsync *GLsync;\n"
    );

    let (manifest, _) = run(Api::Gl, (1, 0), Profile::Core, &[]);
    assert!(!manifest.types.contains("GLsync"));
    assert!(!manifest.types.contains("khrplatform"));
}

#[test]
fn gles_target_uses_its_own_features_and_types() {
    let (manifest, bundle) = run(Api::Gles2, (2, 0), Profile::None, &["GL_KHR_debug"]);
    assert_eq!(manifest.versions.len(), 1);
    assert_eq!(manifest.extensions, vec!["GL_KHR_debug".to_string()]);
    assert_eq!(bundle.get(Fragment::VerDeclarations), "extern int GREG_ES_VERSION_2_0;\n");

    // only the gles2 flavour of GLenum is emitted; untagged types belong to gl
    assert_eq!(bundle.get(Fragment::TypeTypedefs), "typedef unsigned int GLenum;\n");
}

#[test]
fn shipped_templates_are_fully_substituted() {
    let (_, bundle) = run(Api::Gl, (4, 6), Profile::Core, &["GL_KHR_debug"]);
    let bindings = bundle.bindings();

    let header = template::substitute(template::GREG_H, &bindings);
    let source = template::substitute(template::GREG_C, &bindings);

    for text in &[&header, &source] {
        assert!(template::tokens(text).is_empty(), "unsubstituted token left");
    }

    assert!(header.contains("#define GL_KHR_debug 1\n"));
    assert!(header.contains("extern PFNGLDEBUGMESSAGECALLBACKPROC greg_glDebugMessageCallback;\n"));
    assert!(header.contains("typedef void (GLAPIENTRY *GLDEBUGPROC)(GLenum source,GLenum type,GLuint id);\n"));
    assert!(source.contains("GREGDEF int GREG_KHR_debug = 0;\n"));
    assert!(source.contains("  GREG_KHR_debug = gregExtensionSupported(\"GL_KHR_debug\");\n"));
    assert!(source.contains("  greg_glObjectLabel = (PFNGLOBJECTLABELPROC) gregGetProcAddress(\"glObjectLabel\");\n"));
}

#[test]
fn unknown_extension_is_reported_not_fatal() {
    let (manifest, bundle) = run(Api::Gl, (1, 0), Profile::None, &["GL_NV_missing"]);
    assert_eq!(manifest.diagnostics, vec![Diagnostic::UnknownExtension { name: "GL_NV_missing".into() }]);
    assert!(bundle.get(Fragment::CmdLoaders).contains("greg_glFinish"));
}
