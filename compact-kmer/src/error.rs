//! The error types of this crate.

error_chain! {
    foreign_links {
        // Doc comments have to be put after the item in this macro.
        Io(std::io::Error)
        /// An IO error while reading or writing the binary form of a value.
        ;
    }

    errors {
        /// A value was constructed from an empty string.
        EmptyInput(type_name: &'static str) {
            description("input is empty")
            display("{} cannot be empty", type_name)
        }

        /// A character is not part of the alphabet of the value that is constructed.
        InvalidSymbol(symbol: char, type_name: &'static str) {
            description("invalid character")
            display("invalid character in {}: {:?}", type_name, symbol)
        }

        /// A pattern was compared against a key of different length.
        LengthMismatch(pattern_len: usize, key_len: usize) {
            description("pattern and key have different lengths")
            display("pattern of length {} cannot be matched against key of length {}", pattern_len, key_len)
        }

        /// A fixed-capacity value was constructed from too many symbols.
        CapacityExceeded(len: usize, capacity: usize) {
            description("value exceeds its maximum length")
            display("length {} exceeds the maximum length of {}", len, capacity)
        }

        /// A prefix test was given a prefix that is longer than the key.
        PrefixTooLong(prefix_len: usize, key_len: usize) {
            description("prefix is longer than the key")
            display("prefix of length {} is longer than the key of length {}", prefix_len, key_len)
        }

        /// The k-mer length is outside of `1..=32`.
        InvalidK(k: usize) {
            description("invalid k-mer length")
            display("k must be between 1 and 32, but is {}", k)
        }

        /// The text form contains more than one token.
        TrailingInput(type_name: &'static str) {
            description("unexpected trailing input")
            display("could not parse {}: unexpected input after the sequence", type_name)
        }

        /// The binary form is structurally invalid.
        MalformedWire(reason: String) {
            description("malformed binary value")
            display("malformed binary value: {}", reason)
        }
    }
}
