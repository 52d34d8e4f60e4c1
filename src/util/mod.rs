pub mod blosum62;
