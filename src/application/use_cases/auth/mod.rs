pub mod signin;
pub mod signup;
