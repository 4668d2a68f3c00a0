error_chain! {
    links {
        // Doc comments have to be put after the item in this macro.
        Kmer(compact_kmer::error::Error, compact_kmer::error::ErrorKind)
        /// A wrapper for errors thrown while constructing k-mer keys or query patterns.
        ;
    }

    errors {
        /// The strategy number of a scan key is not supported by the operator class.
        UnsupportedStrategy(strategy: u16) {
            description("unsupported search strategy")
            display("unsupported search strategy number: {}", strategy)
        }
    }
}
