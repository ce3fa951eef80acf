error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Parsing(::syntect::parsing::ParsingError);
    }

    errors {
        ThemeNotFound(name: String) {
            description("theme is not available")
            display("theme '{}' is not available", name)
        }
        FileNotFound(path: String) {
            description("file not found")
            display("File {} not found", path)
        }
        InvalidScopeOperation(detail: String) {
            description("grammar produced an invalid scope operation")
            display("grammar produced an invalid scope operation: {}", detail)
        }
    }
}
