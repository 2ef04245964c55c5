pub mod s3_select;
