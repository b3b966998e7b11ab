/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::fs::{self,File};
use std::io::{self,Read,ErrorKind};
use std::path::{Path,PathBuf};

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str())
}

/// lower case extension of the given path (driver lookup tables are keyed with lower case extensions)
pub fn lowercase_extension<T: AsRef<Path>> (path: &T)->Option<String> {
    extension(path).map( |ext| ext.to_ascii_lowercase())
}

pub fn path_to_lossy_string (path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().to_string()
}

/// the directory a new file at `path` would be created in. Bare filenames resolve to the current dir
pub fn parent_dir (path: impl AsRef<Path>)->PathBuf {
    match path.as_ref().parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from(".")
    }
}

/// check if `path` refers to an existing regular file
pub fn existing_file (path: impl AsRef<Path>)->Result<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        Ok( path.to_path_buf() )
    } else if path.exists() {
        Err( io::Error::new( ErrorKind::InvalidInput, format!("not a regular file: {path:?}")) )
    } else {
        Err( io::Error::new( ErrorKind::NotFound, format!("file not found: {path:?}")) )
    }
}

/// check if we could create or overwrite a file at `path`. This does not create anything
pub fn ensure_writable_file_path (path: impl AsRef<Path>)->Result<()> {
    let path = path.as_ref();
    let dir = parent_dir(path);

    if !dir.is_dir() {
        return Err( io::Error::new( ErrorKind::NotFound, format!("output directory does not exist: {dir:?}")) )
    }
    if fs::metadata(&dir)?.permissions().readonly() {
        return Err( io::Error::new( ErrorKind::PermissionDenied, format!("output directory not writable: {dir:?}")) )
    }
    if path.is_dir() {
        return Err( io::Error::new( ErrorKind::InvalidInput, format!("output path is a directory: {path:?}")) )
    }
    if path.is_file() && fs::metadata(path)?.permissions().readonly() {
        return Err( io::Error::new( ErrorKind::PermissionDenied, format!("output file is read-only: {path:?}")) )
    }

    Ok(())
}

pub fn filepath_contents <P: AsRef<Path>> (path: &P) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len() as usize;
    let mut contents: Vec<u8> = Vec::with_capacity(len);
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

pub fn filepath_contents_as_string <P: AsRef<Path>> (path: &P) -> Result<String> {
    Ok( fs::read_to_string(path)? )
}
