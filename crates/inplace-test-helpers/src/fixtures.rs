//! Launcher templates for testing

use indoc::indoc;

/// A full launcher template using every placeholder
pub fn full_template() -> &'static str {
    indoc! {r#"
        #!<PYTHON> <PYTHON_INTERPRETER_FLAGS>
        import os
        import sys

        modules_dir = "<MODULES_DIR>"
        main_module = "<MAIN_MODULE>"
        main_function = "<MAIN_FUNCTION>"
        add_mp_wrapper = <SHOULD_ADD_MULTIPROCESSING_WRAPPER>
        mp_executable = "<MP_EXECUTABLE>"

        native_libs_env_var = "<NATIVE_LIBS_ENV_VAR>"
        native_libs_dir = <NATIVE_LIBS_DIR>
        native_libs_preload_env_var = "<NATIVE_LIBS_PRELOAD_ENV_VAR>"
        native_libs_preload = <NATIVE_LIBS_PRELOAD>

        dirpath = os.path.dirname(os.path.realpath(__file__))
        sys.path.insert(0, os.path.join(dirpath, modules_dir))
    "#}
}

/// A lite launcher template that only needs the search path and entry point
pub fn lite_template() -> &'static str {
    indoc! {r#"
        #!<PYTHON> <PYTHON_INTERPRETER_FLAGS>
        import os
        import runpy
        import sys

        dirpath = os.path.dirname(os.path.realpath(__file__))
        sys.path.insert(0, os.path.join(dirpath, "<MODULES_DIR>"))
        runpy.run_module("<MAIN_MODULE>", run_name="__main__")
    "#}
}

/// A template with bracketed text that is not a placeholder
pub fn template_with_unknown_tokens() -> &'static str {
    indoc! {r#"
        #!<PYTHON>
        # <UNKNOWN_TOKEN> stays, so does <python> and <MODULES_DIR
        if 1 <2 and 3> 2: print("<MAIN_MODULE>")
    "#}
}
